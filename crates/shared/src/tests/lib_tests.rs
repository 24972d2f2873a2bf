use std::str::FromStr;

use serde_json::json;

use crate::{
    domain::{Axis, CalibrationStep, ModuleModel, ModuleType, SessionType, Sign},
    error::{ApiError, CoreError, ErrorCode},
    protocol::{CommandName, DeckSetupSnapshot, SessionCommand, SessionSnapshot},
};

fn tip_rack_json() -> serde_json::Value {
    json!({
        "loadName": "opentrons_96_tiprack_300ul",
        "slot": "8",
        "definition": {
            "namespace": "opentrons",
            "version": 1,
            "parameters": { "loadName": "opentrons_96_tiprack_300ul", "isTiprack": true },
            "metadata": { "displayName": "Opentrons 96 Tip Rack 300 µL" }
        }
    })
}

#[test]
fn parses_session_snapshot_from_robot_json() {
    let raw = json!({
        "id": "6f1c3a52-6c4e-4c8e-9d1b-2f7d3c4a9e10",
        "sessionType": "calibrationCheck",
        "currentStep": "joggingToDeck",
        "instruments": [{
            "mount": "left",
            "model": "p300_single_v2.0",
            "isMulti": false,
            "tipRackLoadName": "opentrons_96_tiprack_300ul",
            "tipRackDisplay": "Opentrons 96 Tip Rack 300 µL"
        }],
        "tipRack": tip_rack_json(),
        "supportedCommands": ["calibration.loadLabware", "calibration.jog"]
    });

    let session: SessionSnapshot = serde_json::from_value(raw).expect("session");
    assert_eq!(session.session_type, SessionType::CalibrationCheck);
    assert_eq!(session.current_step, CalibrationStep::JoggingToDeck);
    assert!(session.calibration_block.is_none());
    assert!(session.supports(CommandName::LoadLabware));
    assert!(!session.supports(CommandName::SaveOffset));
    assert_eq!(
        session.active_instrument().map(|i| i.model.as_str()),
        Some("p300_single_v2.0")
    );
}

#[test]
fn rejects_unknown_step_name() {
    let raw = json!({
        "id": "6f1c3a52-6c4e-4c8e-9d1b-2f7d3c4a9e10",
        "sessionType": "deckCalibration",
        "currentStep": "doingSomethingElse",
        "tipRack": tip_rack_json()
    });
    assert!(serde_json::from_value::<SessionSnapshot>(raw).is_err());
}

#[test]
fn serializes_commands_with_wire_names() {
    let jog = serde_json::to_value(SessionCommand::jog([0.0, 0.0, -0.1])).expect("jog");
    assert_eq!(
        jog,
        json!({ "command": "calibration.jog", "data": { "vector": [0.0, 0.0, -0.1] } })
    );

    let compare = serde_json::to_value(SessionCommand::bare(CommandName::ComparePoint))
        .expect("compare");
    assert_eq!(compare, json!({ "command": "calibration.check.comparePoint" }));
}

#[test]
fn command_name_strings_match_serde_names() {
    let names = [
        CommandName::Jog,
        CommandName::SaveOffset,
        CommandName::MoveToPointOne,
        CommandName::MoveToPointTwo,
        CommandName::MoveToPointThree,
        CommandName::MoveToTipRack,
        CommandName::MoveToDeck,
        CommandName::MoveToReferencePoint,
        CommandName::PickUpTip,
        CommandName::InvalidateTip,
        CommandName::LoadLabware,
        CommandName::ComparePoint,
        CommandName::ReturnTip,
        CommandName::SwitchPipette,
        CommandName::Exit,
    ];
    for name in names {
        let value = serde_json::to_value(name).expect("name");
        assert_eq!(value, json!(name.as_str()));
    }
}

#[test]
fn step_and_session_display_use_wire_names() {
    for step in [CalibrationStep::JoggingToDeck, CalibrationStep::SavingPointThree] {
        let value = serde_json::to_value(step).expect("step");
        assert_eq!(value, json!(step.to_string()));
    }
    assert_eq!(
        serde_json::to_value(SessionType::PipetteOffsetCalibration).expect("type"),
        json!("pipetteOffsetCalibration")
    );
}

#[test]
fn parses_axes_and_signs() {
    assert_eq!(Axis::from_str("Z").expect("axis"), Axis::Z);
    assert_eq!(Sign::try_from(-1i8).expect("sign"), Sign::Negative);
    assert_eq!(Sign::from_str("+").expect("sign"), Sign::Positive);

    let err = Axis::from_str("w").expect_err("unknown axis");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert!(Sign::try_from(0i8).is_err());
}

#[test]
fn module_models_know_their_type_and_collision_class() {
    assert_eq!(
        ModuleModel::MagneticModuleV2.module_type(),
        ModuleType::MagneticModuleType
    );
    assert!(ModuleModel::TemperatureModuleV1.has_collision_issues());
    assert!(!ModuleModel::TemperatureModuleV2.has_collision_issues());
    assert!(!ModuleModel::ThermocyclerModuleV1.has_collision_issues());
}

#[test]
fn parses_deck_setup_with_module_parented_labware() {
    let raw = json!({
        "modules": {
            "mag": { "id": "mag", "slot": "1", "type": "magneticModuleType", "model": "magneticModuleV1" }
        },
        "labware": {
            "plate": {
                "id": "plate",
                "slot": "mag",
                "labwareDefURI": "opentrons/nest_96_wellplate_100ul_pcr_full_skirt/1",
                "def": {
                    "namespace": "opentrons",
                    "version": 1,
                    "parameters": { "loadName": "nest_96_wellplate_100ul_pcr_full_skirt" },
                    "metadata": { "displayName": "NEST 96 PCR" }
                }
            }
        }
    });
    let deck: DeckSetupSnapshot = serde_json::from_value(raw).expect("deck");
    assert_eq!(deck.modules.len(), 1);
    assert!(deck.pipettes.is_empty());
    let plate = deck.labware.values().next().expect("plate");
    assert_eq!(plate.def.uri(), plate.labware_def_uri);
}

#[test]
fn core_errors_convert_to_api_errors() {
    let err = CoreError::Configuration {
        session_type: SessionType::DeckCalibration,
        step: CalibrationStep::ComparingTip,
    };
    let api: ApiError = err.into();
    assert_eq!(api.code, ErrorCode::Configuration);
    assert_eq!(
        api.message,
        "step comparingTip is not part of the deckCalibration step sequence"
    );
}
