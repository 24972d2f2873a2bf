//! Panels the calibration wizard can show, and the table that picks one per step.

use serde::Serialize;
use shared::{
    domain::{CalibrationStep, SessionType},
    protocol::SessionSnapshot,
};

pub const SMALL_STEP_SIZE_MM: f64 = 0.1;
pub const MEDIUM_STEP_SIZE_MM: f64 = 1.0;
pub const LARGE_STEP_SIZE_MM: f64 = 10.0;

const ALL_STEP_SIZES: &[f64] = &[SMALL_STEP_SIZE_MM, MEDIUM_STEP_SIZE_MM, LARGE_STEP_SIZE_MM];
const FINE_STEP_SIZES: &[f64] = &[SMALL_STEP_SIZE_MM, MEDIUM_STEP_SIZE_MM];

/// What the pipette touches while saving or checking the Z point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZPointTarget {
    /// Bare deck, slot 5.
    Slot,
    /// Health check with a calibration block on the deck.
    Block,
    /// Health check without a block; the trash bin stands in for it.
    Trash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationPoint {
    One,
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelVariant {
    Introduction,
    DeckSetup,
    MeasureNozzle,
    TipPickUp,
    TipConfirmation,
    MeasureTip,
    TipLengthComplete,
    SaveZPoint { target: ZPointTarget },
    SaveXyPoint { point: CalibrationPoint },
    ReturnTip,
    ResultsSummary,
    CalibrationComplete,
    Exited,
}

impl PanelVariant {
    /// Localisation key of the panel heading.
    pub fn title_key(&self) -> &'static str {
        match self {
            PanelVariant::Introduction => "before_you_begin",
            PanelVariant::DeckSetup => "prepare_the_space",
            PanelVariant::MeasureNozzle => "measure_nozzle",
            PanelVariant::TipPickUp => "position_pipette_over_tip",
            PanelVariant::TipConfirmation => "did_pipette_pick_up_tip",
            PanelVariant::MeasureTip => "measure_tip",
            PanelVariant::TipLengthComplete => "tip_length_calibrated",
            PanelVariant::SaveZPoint { target } => match target {
                ZPointTarget::Slot => "calibrate_z_axis_on_slot",
                ZPointTarget::Block => "check_z_axis_on_block",
                ZPointTarget::Trash => "check_z_axis_on_trash",
            },
            PanelVariant::SaveXyPoint { point } => match point {
                CalibrationPoint::One => "calibrate_xy_axes_slot_one",
                CalibrationPoint::Two => "calibrate_xy_axes_slot_three",
                CalibrationPoint::Three => "calibrate_xy_axes_slot_seven",
            },
            PanelVariant::ReturnTip => "return_tip",
            PanelVariant::ResultsSummary => "calibration_health_check_results",
            PanelVariant::CalibrationComplete => "calibration_complete",
            PanelVariant::Exited => "session_exited",
        }
    }

    /// Localisation key of the instruction body, where the panel has one.
    pub fn body_key(&self) -> Option<&'static str> {
        match self {
            PanelVariant::SaveZPoint { target } => Some(match target {
                ZPointTarget::Slot => "jog_pipette_to_touch_slot",
                ZPointTarget::Block => "jog_pipette_to_touch_block",
                ZPointTarget::Trash => "jog_pipette_to_touch_trash",
            }),
            PanelVariant::SaveXyPoint { .. } => Some("jog_pipette_to_touch_cross"),
            PanelVariant::MeasureNozzle | PanelVariant::MeasureTip => {
                Some("jog_nozzle_to_touch_block")
            }
            PanelVariant::TipPickUp => Some("jog_pipette_over_tip"),
            _ => None,
        }
    }

    /// Jog step sizes offered on this panel; empty when it has no jog controls.
    pub fn jog_step_sizes(&self) -> &'static [f64] {
        match self {
            PanelVariant::SaveZPoint { .. } => FINE_STEP_SIZES,
            PanelVariant::MeasureNozzle
            | PanelVariant::TipPickUp
            | PanelVariant::MeasureTip
            | PanelVariant::SaveXyPoint { .. } => ALL_STEP_SIZES,
            _ => &[],
        }
    }

    pub fn has_jog_controls(&self) -> bool {
        !self.jog_step_sizes().is_empty()
    }
}

/// Panel for a step already known to belong to the session's sequence.
pub(crate) fn panel_for_step(session: &SessionSnapshot) -> PanelVariant {
    match session.current_step {
        CalibrationStep::SessionStarted => PanelVariant::Introduction,
        CalibrationStep::LabwareLoaded => PanelVariant::DeckSetup,
        CalibrationStep::MeasuringNozzleOffset | CalibrationStep::ComparingNozzle => {
            PanelVariant::MeasureNozzle
        }
        CalibrationStep::PreparingPipette => PanelVariant::TipPickUp,
        CalibrationStep::InspectingTip => PanelVariant::TipConfirmation,
        CalibrationStep::MeasuringTipOffset | CalibrationStep::ComparingTip => {
            PanelVariant::MeasureTip
        }
        CalibrationStep::TipLengthComplete => PanelVariant::TipLengthComplete,
        CalibrationStep::JoggingToDeck => PanelVariant::SaveZPoint {
            target: z_point_target(session),
        },
        CalibrationStep::SavingPointOne | CalibrationStep::ComparingPointOne => {
            PanelVariant::SaveXyPoint {
                point: CalibrationPoint::One,
            }
        }
        CalibrationStep::SavingPointTwo | CalibrationStep::ComparingPointTwo => {
            PanelVariant::SaveXyPoint {
                point: CalibrationPoint::Two,
            }
        }
        CalibrationStep::SavingPointThree | CalibrationStep::ComparingPointThree => {
            PanelVariant::SaveXyPoint {
                point: CalibrationPoint::Three,
            }
        }
        CalibrationStep::ReturningTip => PanelVariant::ReturnTip,
        CalibrationStep::ResultsSummary => PanelVariant::ResultsSummary,
        CalibrationStep::CalibrationComplete => PanelVariant::CalibrationComplete,
        CalibrationStep::SessionExited => PanelVariant::Exited,
    }
}

fn z_point_target(session: &SessionSnapshot) -> ZPointTarget {
    match session.session_type {
        SessionType::CalibrationCheck if session.calibration_block.is_some() => ZPointTarget::Block,
        SessionType::CalibrationCheck => ZPointTarget::Trash,
        _ => ZPointTarget::Slot,
    }
}
