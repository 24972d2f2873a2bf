use deck::{CheckerConfig, CompatibilityChecker, CustomLabwareDefs, DeckLayout};
use serde_json::json;
use shared::protocol::DeckSetupSnapshot;

fn designer_deck() -> DeckSetupSnapshot {
    serde_json::from_value(json!({
        "modules": {
            "magnet": { "id": "magnet", "slot": "1", "type": "magneticModuleType", "model": "magneticModuleV1" },
            "heater": { "id": "heater", "slot": "3", "type": "temperatureModuleType", "model": "temperatureModuleV2" }
        },
        "labware": {
            "plate": {
                "id": "plate",
                "slot": "magnet",
                "labwareDefURI": "opentrons/nest_96_wellplate_100ul_pcr_full_skirt/1",
                "def": {
                    "namespace": "opentrons",
                    "version": 1,
                    "parameters": { "loadName": "nest_96_wellplate_100ul_pcr_full_skirt" },
                    "metadata": { "displayName": "NEST 96 Well Plate 100 µL PCR Full Skirt" }
                }
            },
            "custom": {
                "id": "custom",
                "slot": "5",
                "labwareDefURI": "custom_beta/my_tube_rack/1",
                "def": {
                    "namespace": "custom_beta",
                    "version": 1,
                    "parameters": { "loadName": "my_tube_rack" },
                    "metadata": { "displayName": "My Tube Rack" }
                }
            },
            "tubes": {
                "id": "tubes",
                "slot": "heater",
                "labwareDefURI": "opentrons/opentrons_24_aluminumblock_nest_1.5ml_snapcap/1",
                "def": {
                    "namespace": "opentrons",
                    "version": 1,
                    "parameters": { "loadName": "opentrons_24_aluminumblock_nest_1.5ml_snapcap" },
                    "metadata": { "displayName": "Aluminum Block" }
                }
            }
        },
        "pipettes": {
            "left": { "id": "left", "name": "p50_multi", "mount": "left" }
        }
    }))
    .expect("deck setup")
}

fn custom_defs(setup: &DeckSetupSnapshot) -> CustomLabwareDefs {
    setup
        .labware
        .values()
        .filter(|labware| labware.def.namespace == "custom_beta")
        .map(|labware| (labware.labware_def_uri.clone(), labware.def.clone()))
        .collect()
}

#[test]
fn swapping_module_labware_checks_both_directions() {
    let setup = designer_deck();
    let layout = DeckLayout::from_snapshot(&setup).expect("layout");
    let checker = CompatibilityChecker::new(CheckerConfig::default());
    let defs = custom_defs(&setup);

    // The aluminium block cannot go on the magnetic module.
    assert!(checker
        .check_swap(&layout, &"tubes".into(), Some(&"plate".into()), &defs)
        .expect("tubes over plate"));
    // The custom rack may sit on the magnet and the plate lands on bare slot 5.
    assert!(!checker
        .check_swap(&layout, &"custom".into(), Some(&"plate".into()), &defs)
        .expect("custom over plate"));
    // Dragging the plate onto the custom rack sends the custom rack onto the
    // magnet, which its custom status allows.
    assert!(!checker
        .check_swap(&layout, &"plate".into(), Some(&"custom".into()), &defs)
        .expect("plate over custom"));
}

#[test]
fn warns_behind_gen_one_magnet_for_gen_one_multichannel() {
    let setup = designer_deck();
    let layout = DeckLayout::from_snapshot(&setup).expect("layout");

    let warnings = CompatibilityChecker::default().collision_warning_slots(&layout);
    let warnings: Vec<&str> = warnings.iter().map(|slot| slot.as_str()).collect();
    assert_eq!(warnings, vec!["4"]);
}
