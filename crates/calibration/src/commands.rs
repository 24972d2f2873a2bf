//! Outbound command construction for the proceed and jog actions.

use shared::{
    domain::{Axis, LabwareDefinition, SessionType, Sign},
    error::CoreError,
    protocol::{CommandName, SessionCommand, SessionSnapshot},
};

use crate::{
    panel::{CalibrationPoint, PanelVariant},
    sequence::measures_tip_length,
};

/// Tolerance when matching a requested jog step against the declared sizes.
const STEP_SIZE_EPSILON: f64 = 1e-9;

/// What the operator picked on the current panel, beyond "continue".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UserChoice {
    #[default]
    Confirm,
    /// Use this tip rack instead of the session default (introduction only).
    ChooseTipRack(LabwareDefinition),
    /// The tip was not picked up correctly (tip confirmation only).
    InvalidateTip,
}

/// Displacement vector for one jog press.
pub fn format_jog_vector(axis: Axis, sign: Sign, step_mm: f64) -> [f64; 3] {
    let mut vector = [0.0; 3];
    vector[axis.index()] = sign.as_f64() * step_mm;
    vector
}

pub(crate) fn jog_command(
    axis: Axis,
    sign: Sign,
    step_mm: f64,
    declared_step_sizes: &[f64],
) -> Result<SessionCommand, CoreError> {
    if !step_mm.is_finite() || step_mm <= 0.0 {
        return Err(CoreError::invalid(format!(
            "jog step must be a positive distance, got {step_mm}"
        )));
    }
    if !declared_step_sizes
        .iter()
        .any(|size| (size - step_mm).abs() < STEP_SIZE_EPSILON)
    {
        return Err(CoreError::invalid(format!(
            "jog step {step_mm} mm is not one of the declared step sizes {declared_step_sizes:?}"
        )));
    }
    Ok(SessionCommand::jog(format_jog_vector(axis, sign, step_mm)))
}

pub(crate) fn proceed_commands(
    session: &SessionSnapshot,
    panel: PanelVariant,
    choice: UserChoice,
    choose_tip_rack_enabled: bool,
) -> Result<Vec<SessionCommand>, CoreError> {
    match (&choice, panel) {
        (UserChoice::Confirm, _) => {}
        (UserChoice::ChooseTipRack(_), PanelVariant::Introduction) => {
            if !choose_tip_rack_enabled {
                return Err(CoreError::invalid("choosing a tip rack is disabled"));
            }
            if session.session_type != SessionType::DeckCalibration {
                return Err(CoreError::invalid(format!(
                    "a {} session keeps its own tip rack",
                    session.session_type
                )));
            }
        }
        (UserChoice::InvalidateTip, PanelVariant::TipConfirmation) => {
            return Ok(vec![SessionCommand::bare(CommandName::InvalidateTip)]);
        }
        (other, panel) => {
            return Err(CoreError::invalid(format!(
                "{other:?} is not available on the {} panel",
                panel.title_key()
            )));
        }
    }

    let record = record_command(session.session_type);
    let commands = match panel {
        PanelVariant::Introduction => vec![load_labware_command(session, choice)],
        PanelVariant::DeckSetup => vec![bare(if measures_tip_length(session)
            || session.session_type.is_health_check()
        {
            CommandName::MoveToReferencePoint
        } else {
            CommandName::MoveToTipRack
        })],
        PanelVariant::MeasureNozzle => vec![bare(record), bare(CommandName::MoveToTipRack)],
        PanelVariant::TipPickUp => vec![bare(CommandName::PickUpTip)],
        PanelVariant::TipConfirmation => vec![bare(if measures_tip_length(session)
            || session.session_type.is_health_check()
        {
            CommandName::MoveToReferencePoint
        } else {
            CommandName::MoveToDeck
        })],
        PanelVariant::MeasureTip => match session.session_type {
            SessionType::CalibrationCheck => {
                vec![bare(CommandName::ComparePoint), bare(CommandName::MoveToDeck)]
            }
            SessionType::PipetteOffsetCalibration => vec![bare(CommandName::SaveOffset)],
            _ => vec![bare(CommandName::SaveOffset), bare(CommandName::MoveToTipRack)],
        },
        PanelVariant::TipLengthComplete => vec![bare(CommandName::MoveToDeck)],
        PanelVariant::SaveZPoint { .. } => vec![bare(record), bare(CommandName::MoveToPointOne)],
        PanelVariant::SaveXyPoint { point } => {
            vec![bare(record), bare(move_after_point(session.session_type, point))]
        }
        PanelVariant::ReturnTip => {
            if has_pipette_left_to_check(session) {
                vec![bare(CommandName::ReturnTip), bare(CommandName::SwitchPipette)]
            } else {
                vec![bare(CommandName::ReturnTip)]
            }
        }
        PanelVariant::ResultsSummary | PanelVariant::CalibrationComplete => {
            vec![bare(CommandName::Exit)]
        }
        PanelVariant::Exited => {
            return Err(CoreError::invalid("session has already exited"));
        }
    };
    Ok(commands)
}

fn bare(command: CommandName) -> SessionCommand {
    SessionCommand::bare(command)
}

/// Health checks compare against stored values; everything else saves.
fn record_command(session_type: SessionType) -> CommandName {
    if session_type.is_health_check() {
        CommandName::ComparePoint
    } else {
        CommandName::SaveOffset
    }
}

fn move_after_point(session_type: SessionType, point: CalibrationPoint) -> CommandName {
    match (session_type, point) {
        (SessionType::PipetteOffsetCalibration, _) => CommandName::MoveToTipRack,
        (_, CalibrationPoint::One) => CommandName::MoveToPointTwo,
        (_, CalibrationPoint::Two) => CommandName::MoveToPointThree,
        (_, CalibrationPoint::Three) => CommandName::MoveToTipRack,
    }
}

fn load_labware_command(session: &SessionSnapshot, choice: UserChoice) -> SessionCommand {
    if !session.supports(CommandName::LoadLabware) {
        return bare(CommandName::LoadLabware);
    }
    let definition = match choice {
        UserChoice::ChooseTipRack(definition) => definition,
        _ => session.tip_rack.definition.clone(),
    };
    SessionCommand::load_labware(definition)
}

fn has_pipette_left_to_check(session: &SessionSnapshot) -> bool {
    let Some(active) = session.active_mount else {
        return session.instruments.len() > 1;
    };
    session
        .instruments
        .iter()
        .position(|instrument| instrument.mount == active)
        .is_some_and(|index| index + 1 < session.instruments.len())
}
