use calibration::{PanelVariant, StepResolver, UserChoice, ZPointTarget};
use serde_json::json;
use shared::{
    domain::CalibrationStep,
    protocol::{CommandName, SessionSnapshot},
};

fn health_check_at(step: &str) -> SessionSnapshot {
    serde_json::from_value(json!({
        "id": "0b5d9e7e-1f4a-4c55-8a0e-6d6f2b9c1a77",
        "sessionType": "calibrationCheck",
        "currentStep": step,
        "instruments": [{
            "mount": "right",
            "model": "p20_single_v2.0",
            "tipRackLoadName": "opentrons_96_tiprack_20ul",
            "tipRackDisplay": "Opentrons 96 Tip Rack 20 µL"
        }],
        "activeMount": "right",
        "tipRack": {
            "loadName": "opentrons_96_tiprack_20ul",
            "slot": "8",
            "definition": {
                "namespace": "opentrons",
                "version": 1,
                "parameters": { "loadName": "opentrons_96_tiprack_20ul", "isTiprack": true },
                "metadata": { "displayName": "Opentrons 96 Tip Rack 20 µL" }
            }
        },
        "supportedCommands": ["calibration.loadLabware"]
    }))
    .expect("health check snapshot")
}

#[test]
fn jogging_to_deck_without_block_touches_trash_and_compares() {
    let resolver = StepResolver::default();
    let session = health_check_at("joggingToDeck");

    let panel = resolver.resolve_panel(&session).expect("panel");
    assert_eq!(
        panel,
        PanelVariant::SaveZPoint {
            target: ZPointTarget::Trash
        }
    );
    assert_eq!(panel.title_key(), "check_z_axis_on_trash");

    let commands = resolver
        .build_proceed_command(&session, UserChoice::Confirm)
        .expect("proceed");
    let names: Vec<CommandName> = commands.iter().map(|c| c.command).collect();
    assert_eq!(
        names,
        vec![CommandName::ComparePoint, CommandName::MoveToPointOne]
    );

    let wire = serde_json::to_value(&commands).expect("wire");
    assert_eq!(
        wire,
        json!([
            { "command": "calibration.check.comparePoint" },
            { "command": "calibration.moveToPointOne" }
        ])
    );
}

#[test]
fn health_check_walks_every_step_with_single_pipette() {
    let resolver = StepResolver::default();
    let expected = [
        ("sessionStarted", vec![CommandName::LoadLabware]),
        ("labwareLoaded", vec![CommandName::MoveToReferencePoint]),
        (
            "comparingNozzle",
            vec![CommandName::ComparePoint, CommandName::MoveToTipRack],
        ),
        ("preparingPipette", vec![CommandName::PickUpTip]),
        ("inspectingTip", vec![CommandName::MoveToReferencePoint]),
        (
            "comparingTip",
            vec![CommandName::ComparePoint, CommandName::MoveToDeck],
        ),
        (
            "joggingToDeck",
            vec![CommandName::ComparePoint, CommandName::MoveToPointOne],
        ),
        (
            "comparingPointOne",
            vec![CommandName::ComparePoint, CommandName::MoveToPointTwo],
        ),
        (
            "comparingPointTwo",
            vec![CommandName::ComparePoint, CommandName::MoveToPointThree],
        ),
        (
            "comparingPointThree",
            vec![CommandName::ComparePoint, CommandName::MoveToTipRack],
        ),
        ("returningTip", vec![CommandName::ReturnTip]),
        ("resultsSummary", vec![CommandName::Exit]),
        ("calibrationComplete", vec![CommandName::Exit]),
    ];

    for (step, names) in expected {
        let session = health_check_at(step);
        let commands = resolver
            .build_proceed_command(&session, UserChoice::Confirm)
            .unwrap_or_else(|err| panic!("{step}: {err}"));
        let actual: Vec<CommandName> = commands.iter().map(|c| c.command).collect();
        assert_eq!(actual, names, "{step}");
    }
}

#[test]
fn deck_calibration_step_is_rejected_for_health_check() {
    let resolver = StepResolver::default();
    let session = health_check_at("savingPointTwo");
    assert_eq!(session.current_step, CalibrationStep::SavingPointTwo);
    assert!(resolver.resolve_panel(&session).is_err());
    assert!(resolver
        .build_proceed_command(&session, UserChoice::Confirm)
        .is_err());
}
