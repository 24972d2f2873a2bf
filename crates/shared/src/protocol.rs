use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    CalibrationStep, LabwareDefinition, LabwareId, ModuleId, ModuleModel, ModuleType, Mount,
    PipetteId, SessionId, SessionType, SlotId,
};

/// Command names understood by the robot's calibration session endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandName {
    #[serde(rename = "calibration.jog")]
    Jog,
    #[serde(rename = "calibration.saveOffset")]
    SaveOffset,
    #[serde(rename = "calibration.moveToPointOne")]
    MoveToPointOne,
    #[serde(rename = "calibration.deck.moveToPointTwo")]
    MoveToPointTwo,
    #[serde(rename = "calibration.deck.moveToPointThree")]
    MoveToPointThree,
    #[serde(rename = "calibration.moveToTipRack")]
    MoveToTipRack,
    #[serde(rename = "calibration.moveToDeck")]
    MoveToDeck,
    #[serde(rename = "calibration.moveToReferencePoint")]
    MoveToReferencePoint,
    #[serde(rename = "calibration.pickUpTip")]
    PickUpTip,
    #[serde(rename = "calibration.invalidateTip")]
    InvalidateTip,
    #[serde(rename = "calibration.loadLabware")]
    LoadLabware,
    #[serde(rename = "calibration.check.comparePoint")]
    ComparePoint,
    #[serde(rename = "calibration.check.returnTip")]
    ReturnTip,
    #[serde(rename = "calibration.check.switchPipette")]
    SwitchPipette,
    #[serde(rename = "calibration.exitSession")]
    Exit,
}

impl CommandName {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Jog => "calibration.jog",
            CommandName::SaveOffset => "calibration.saveOffset",
            CommandName::MoveToPointOne => "calibration.moveToPointOne",
            CommandName::MoveToPointTwo => "calibration.deck.moveToPointTwo",
            CommandName::MoveToPointThree => "calibration.deck.moveToPointThree",
            CommandName::MoveToTipRack => "calibration.moveToTipRack",
            CommandName::MoveToDeck => "calibration.moveToDeck",
            CommandName::MoveToReferencePoint => "calibration.moveToReferencePoint",
            CommandName::PickUpTip => "calibration.pickUpTip",
            CommandName::InvalidateTip => "calibration.invalidateTip",
            CommandName::LoadLabware => "calibration.loadLabware",
            CommandName::ComparePoint => "calibration.check.comparePoint",
            CommandName::ReturnTip => "calibration.check.returnTip",
            CommandName::SwitchPipette => "calibration.check.switchPipette",
            CommandName::Exit => "calibration.exitSession",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandData {
    Jog {
        vector: [f64; 3],
    },
    LoadLabware {
        #[serde(rename = "tiprackDefinition")]
        tiprack_definition: LabwareDefinition,
    },
}

/// Outbound command descriptor handed to the session transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCommand {
    pub command: CommandName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CommandData>,
}

impl SessionCommand {
    pub fn bare(command: CommandName) -> Self {
        Self {
            command,
            data: None,
        }
    }

    pub fn jog(vector: [f64; 3]) -> Self {
        Self {
            command: CommandName::Jog,
            data: Some(CommandData::Jog { vector }),
        }
    }

    pub fn load_labware(tiprack_definition: LabwareDefinition) -> Self {
        Self {
            command: CommandName::LoadLabware,
            data: Some(CommandData::LoadLabware { tiprack_definition }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSnapshot {
    pub mount: Mount,
    pub model: String,
    #[serde(default)]
    pub is_multi: bool,
    pub tip_rack_load_name: String,
    pub tip_rack_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareSnapshot {
    pub load_name: String,
    pub slot: SlotId,
    pub definition: LabwareDefinition,
}

/// Mirror of a calibration session as last reported by the robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub session_type: SessionType,
    pub current_step: CalibrationStep,
    #[serde(default)]
    pub instruments: Vec<InstrumentSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_mount: Option<Mount>,
    pub tip_rack: LabwareSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_block: Option<LabwareSnapshot>,
    #[serde(default)]
    pub supported_commands: Vec<CommandName>,
    /// Pipette-offset sessions may calibrate tip length first.
    #[serde(default)]
    pub should_perform_tip_length: bool,
}

impl SessionSnapshot {
    pub fn active_instrument(&self) -> Option<&InstrumentSnapshot> {
        match self.active_mount {
            Some(mount) => self.instruments.iter().find(|i| i.mount == mount),
            None => self.instruments.first(),
        }
    }

    pub fn supports(&self, command: CommandName) -> bool {
        self.supported_commands.contains(&command)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOnDeck {
    pub id: ModuleId,
    pub slot: SlotId,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub model: ModuleModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareOnDeck {
    pub id: LabwareId,
    /// A deck slot label, or the id of the module the labware sits on.
    pub slot: SlotId,
    #[serde(rename = "labwareDefURI")]
    pub labware_def_uri: String,
    pub def: LabwareDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipetteOnDeck {
    pub id: PipetteId,
    pub name: String,
    pub mount: Mount,
}

/// Initial deck setup as held by the protocol designer's store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckSetupSnapshot {
    #[serde(default)]
    pub labware: BTreeMap<LabwareId, LabwareOnDeck>,
    #[serde(default)]
    pub modules: BTreeMap<ModuleId, ModuleOnDeck>,
    #[serde(default)]
    pub pipettes: BTreeMap<PipetteId, PipetteOnDeck>,
}
