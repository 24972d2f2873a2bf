use std::collections::BTreeSet;

use serde::Serialize;
use shared::{
    domain::{LabwareDefinition, SessionType},
    protocol::SessionSnapshot,
};

pub const TRASH_BIN_LOAD_NAME: &str = "opentrons_1_trash_1100ml_fixed";
pub const TRASH_BIN_DISPLAY_NAME: &str = "Removable black plastic trash bin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub load_name: String,
    pub display_name: String,
}

/// Labware the operator must place on the deck before starting.
///
/// When attached pipettes use different tip racks each rack is listed; a
/// chosen rack replaces them. The calibration block is added if present,
/// otherwise health checks and tip length sessions need the trash bin.
pub fn required_equipment(
    session: &SessionSnapshot,
    chosen_tip_rack: Option<&LabwareDefinition>,
) -> Vec<EquipmentItem> {
    let unique_racks: BTreeSet<&str> = session
        .instruments
        .iter()
        .map(|instrument| instrument.tip_rack_load_name.as_str())
        .collect();

    let mut items: Vec<EquipmentItem> = if let Some(chosen) = chosen_tip_rack {
        vec![EquipmentItem {
            load_name: chosen.load_name().to_string(),
            display_name: chosen.display_name().to_string(),
        }]
    } else if unique_racks.len() > 1 {
        session
            .instruments
            .iter()
            .map(|instrument| EquipmentItem {
                load_name: instrument.tip_rack_load_name.clone(),
                display_name: instrument.tip_rack_display.clone(),
            })
            .collect()
    } else {
        vec![EquipmentItem {
            load_name: session.tip_rack.load_name.clone(),
            display_name: session.tip_rack.definition.display_name().to_string(),
        }]
    };

    if let Some(block) = &session.calibration_block {
        items.push(EquipmentItem {
            load_name: block.load_name.clone(),
            display_name: block.definition.display_name().to_string(),
        });
    } else if matches!(
        session.session_type,
        SessionType::CalibrationCheck | SessionType::TipLengthCalibration
    ) {
        items.push(EquipmentItem {
            load_name: TRASH_BIN_LOAD_NAME.to_string(),
            display_name: TRASH_BIN_DISPLAY_NAME.to_string(),
        });
    }

    items
}
