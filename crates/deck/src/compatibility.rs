//! Which labware may sit on which module.

use std::collections::BTreeMap;

use shared::{
    domain::{LabwareDefinition, ModuleType},
    protocol::LabwareOnDeck,
};

/// User-authored labware definitions keyed by definition URI.
pub type CustomLabwareDefs = BTreeMap<String, LabwareDefinition>;

const TEMPERATURE_MODULE_LABWARE: &[&str] = &[
    "opentrons_24_aluminumblock_generic_2ml_screwcap",
    "opentrons_24_aluminumblock_nest_0.5ml_screwcap",
    "opentrons_24_aluminumblock_nest_1.5ml_screwcap",
    "opentrons_24_aluminumblock_nest_1.5ml_snapcap",
    "opentrons_24_aluminumblock_nest_2ml_screwcap",
    "opentrons_24_aluminumblock_nest_2ml_snapcap",
    "opentrons_96_aluminumblock_biorad_wellplate_200ul",
    "opentrons_96_aluminumblock_generic_pcr_strip_200ul",
    "opentrons_96_aluminumblock_nest_wellplate_100ul",
];

const MAGNETIC_MODULE_LABWARE: &[&str] = &[
    "biorad_96_wellplate_200ul_pcr",
    "nest_96_wellplate_100ul_pcr_full_skirt",
    "nest_96_wellplate_2ml_deep",
    "usascientific_96_wellplate_2.4ml_deep",
];

const THERMOCYCLER_LABWARE: &[&str] = &[
    "biorad_96_wellplate_200ul_pcr",
    "nest_96_wellplate_100ul_pcr_full_skirt",
];

const HEATER_SHAKER_LABWARE: &[&str] = &[
    "opentrons_96_deep_well_adapter_nest_wellplate_2ml_deep",
    "opentrons_96_flat_bottom_adapter_nest_wellplate_200ul_flat",
    "opentrons_96_pcr_adapter_nest_wellplate_100ul_pcr_full_skirt",
    "opentrons_universal_flat_adapter_corning_384_wellplate_112ul_flat",
];

fn allowed_load_names(module_type: ModuleType) -> &'static [&'static str] {
    match module_type {
        ModuleType::TemperatureModuleType => TEMPERATURE_MODULE_LABWARE,
        ModuleType::MagneticModuleType => MAGNETIC_MODULE_LABWARE,
        ModuleType::ThermocyclerModuleType => THERMOCYCLER_LABWARE,
        ModuleType::HeaterShakerModuleType => HEATER_SHAKER_LABWARE,
    }
}

/// Definition quirk that rules a labware out for a module type even when
/// its load name is on the allow-list.
pub fn incompatibility_quirk(module_type: ModuleType) -> &'static str {
    match module_type {
        ModuleType::TemperatureModuleType => "incompatibleWithTemperatureModule",
        ModuleType::MagneticModuleType => "incompatibleWithMagneticModule",
        ModuleType::ThermocyclerModuleType => "incompatibleWithThermocycler",
        ModuleType::HeaterShakerModuleType => "incompatibleWithHeaterShaker",
    }
}

pub fn is_labware_compatible_with_module(
    definition: &LabwareDefinition,
    module_type: ModuleType,
) -> bool {
    allowed_load_names(module_type).contains(&definition.load_name())
        && !definition.has_quirk(incompatibility_quirk(module_type))
}

pub fn is_labware_custom(custom_defs: &CustomLabwareDefs, labware: &LabwareOnDeck) -> bool {
    custom_defs.contains_key(&labware.labware_def_uri)
}

/// Whether `labware` may not be placed on a module of `module_type`.
/// Nothing blocks placement off-module, and custom labware is never blocked.
pub(crate) fn placement_blocked(
    labware: &LabwareOnDeck,
    module_type: Option<ModuleType>,
    custom_defs: &CustomLabwareDefs,
) -> bool {
    match module_type {
        Some(module_type) => {
            !is_labware_compatible_with_module(&labware.def, module_type)
                && !is_labware_custom(custom_defs, labware)
        }
        None => false,
    }
}
