use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(SlotId);
id_newtype!(LabwareId);
id_newtype!(ModuleId);
id_newtype!(PipetteId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    DeckCalibration,
    PipetteOffsetCalibration,
    TipLengthCalibration,
    /// Calibration health check; compares points instead of saving them.
    CalibrationCheck,
}

impl SessionType {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::DeckCalibration => "deckCalibration",
            SessionType::PipetteOffsetCalibration => "pipetteOffsetCalibration",
            SessionType::TipLengthCalibration => "tipLengthCalibration",
            SessionType::CalibrationCheck => "calibrationCheck",
        }
    }

    pub fn is_health_check(self) -> bool {
        self == SessionType::CalibrationCheck
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-reported position within a calibration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalibrationStep {
    SessionStarted,
    LabwareLoaded,
    MeasuringNozzleOffset,
    PreparingPipette,
    InspectingTip,
    MeasuringTipOffset,
    TipLengthComplete,
    JoggingToDeck,
    SavingPointOne,
    SavingPointTwo,
    SavingPointThree,
    ComparingNozzle,
    ComparingTip,
    ComparingPointOne,
    ComparingPointTwo,
    ComparingPointThree,
    ReturningTip,
    ResultsSummary,
    CalibrationComplete,
    SessionExited,
}

impl CalibrationStep {
    pub fn as_str(self) -> &'static str {
        match self {
            CalibrationStep::SessionStarted => "sessionStarted",
            CalibrationStep::LabwareLoaded => "labwareLoaded",
            CalibrationStep::MeasuringNozzleOffset => "measuringNozzleOffset",
            CalibrationStep::PreparingPipette => "preparingPipette",
            CalibrationStep::InspectingTip => "inspectingTip",
            CalibrationStep::MeasuringTipOffset => "measuringTipOffset",
            CalibrationStep::TipLengthComplete => "tipLengthComplete",
            CalibrationStep::JoggingToDeck => "joggingToDeck",
            CalibrationStep::SavingPointOne => "savingPointOne",
            CalibrationStep::SavingPointTwo => "savingPointTwo",
            CalibrationStep::SavingPointThree => "savingPointThree",
            CalibrationStep::ComparingNozzle => "comparingNozzle",
            CalibrationStep::ComparingTip => "comparingTip",
            CalibrationStep::ComparingPointOne => "comparingPointOne",
            CalibrationStep::ComparingPointTwo => "comparingPointTwo",
            CalibrationStep::ComparingPointThree => "comparingPointThree",
            CalibrationStep::ReturningTip => "returningTip",
            CalibrationStep::ResultsSummary => "resultsSummary",
            CalibrationStep::CalibrationComplete => "calibrationComplete",
            CalibrationStep::SessionExited => "sessionExited",
        }
    }
}

impl fmt::Display for CalibrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mount {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in a jog displacement vector.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(CoreError::InvalidInput(format!(
                "unrecognized jog axis '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub const ALL: [Sign; 2] = [Sign::Positive, Sign::Negative];

    pub fn as_f64(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = CoreError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            other => Err(CoreError::InvalidInput(format!(
                "jog direction must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl FromStr for Sign {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "+1" | "1" => Ok(Sign::Positive),
            "-" | "-1" => Ok(Sign::Negative),
            other => Err(CoreError::InvalidInput(format!(
                "unrecognized jog direction '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleType {
    MagneticModuleType,
    TemperatureModuleType,
    ThermocyclerModuleType,
    HeaterShakerModuleType,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::MagneticModuleType => "magneticModuleType",
            ModuleType::TemperatureModuleType => "temperatureModuleType",
            ModuleType::ThermocyclerModuleType => "thermocyclerModuleType",
            ModuleType::HeaterShakerModuleType => "heaterShakerModuleType",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleModel {
    MagneticModuleV1,
    MagneticModuleV2,
    TemperatureModuleV1,
    TemperatureModuleV2,
    ThermocyclerModuleV1,
    ThermocyclerModuleV2,
    HeaterShakerModuleV1,
}

impl ModuleModel {
    pub fn module_type(self) -> ModuleType {
        match self {
            ModuleModel::MagneticModuleV1 | ModuleModel::MagneticModuleV2 => {
                ModuleType::MagneticModuleType
            }
            ModuleModel::TemperatureModuleV1 | ModuleModel::TemperatureModuleV2 => {
                ModuleType::TemperatureModuleType
            }
            ModuleModel::ThermocyclerModuleV1 | ModuleModel::ThermocyclerModuleV2 => {
                ModuleType::ThermocyclerModuleType
            }
            ModuleModel::HeaterShakerModuleV1 => ModuleType::HeaterShakerModuleType,
        }
    }

    /// Gen-1 magnetic and temperature modules are tall enough to collide
    /// with gen-1 multichannel pipettes working in the slot behind them.
    pub fn has_collision_issues(self) -> bool {
        matches!(
            self,
            ModuleModel::MagneticModuleV1 | ModuleModel::TemperatureModuleV1
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareParameters {
    pub load_name: String,
    #[serde(default)]
    pub is_tiprack: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quirks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareMetadata {
    pub display_name: String,
}

/// The subset of a labware definition the calibration and deck rules read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabwareDefinition {
    pub namespace: String,
    pub version: u32,
    pub parameters: LabwareParameters,
    pub metadata: LabwareMetadata,
}

impl LabwareDefinition {
    pub fn load_name(&self) -> &str {
        &self.parameters.load_name
    }

    pub fn display_name(&self) -> &str {
        &self.metadata.display_name
    }

    pub fn uri(&self) -> String {
        format!(
            "{}/{}/{}",
            self.namespace, self.parameters.load_name, self.version
        )
    }

    pub fn has_quirk(&self, quirk: &str) -> bool {
        self.parameters.quirks.iter().any(|q| q == quirk)
    }
}
