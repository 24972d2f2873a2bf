//! Calibration step resolver: picks the wizard panel for a session snapshot
//! and builds the commands the operator's actions send back to the robot.

use shared::{
    domain::{Axis, Sign},
    error::CoreError,
    protocol::{SessionCommand, SessionSnapshot},
};
use tracing::{debug, warn};

mod commands;
pub mod equipment;
pub mod panel;
pub mod sequence;

pub use commands::{format_jog_vector, UserChoice};
pub use equipment::{required_equipment, EquipmentItem};
pub use panel::{
    CalibrationPoint, PanelVariant, ZPointTarget, LARGE_STEP_SIZE_MM, MEDIUM_STEP_SIZE_MM,
    SMALL_STEP_SIZE_MM,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Jog distances, in millimetres, the operator may request.
    pub jog_step_sizes: Vec<f64>,
    /// Lets the operator swap in a different tip rack on the introduction panel.
    pub choose_tip_rack: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            jog_step_sizes: vec![SMALL_STEP_SIZE_MM, MEDIUM_STEP_SIZE_MM, LARGE_STEP_SIZE_MM],
            choose_tip_rack: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepResolver {
    config: ResolverConfig,
}

impl StepResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve_panel(&self, session: &SessionSnapshot) -> Result<PanelVariant, CoreError> {
        if !sequence::is_reachable(session) {
            let err = CoreError::Configuration {
                session_type: session.session_type,
                step: session.current_step,
            };
            warn!(session_id = %session.id, error = %err, "unmapped calibration step");
            return Err(err);
        }

        let panel = panel::panel_for_step(session);
        debug!(
            session_id = %session.id,
            step = %session.current_step,
            panel = panel.title_key(),
            "resolved calibration panel"
        );
        Ok(panel)
    }

    /// Commands for the panel's primary action, in send order.
    pub fn build_proceed_command(
        &self,
        session: &SessionSnapshot,
        choice: UserChoice,
    ) -> Result<Vec<SessionCommand>, CoreError> {
        let panel = self.resolve_panel(session)?;
        let commands =
            commands::proceed_commands(session, panel, choice, self.config.choose_tip_rack)
                .inspect_err(|err| {
                    warn!(session_id = %session.id, error = %err, "proceed rejected")
                })?;
        debug!(
            session_id = %session.id,
            commands = ?commands.iter().map(|c| c.command.as_str()).collect::<Vec<_>>(),
            "built proceed commands"
        );
        Ok(commands)
    }

    pub fn build_jog_command(
        &self,
        axis: Axis,
        sign: Sign,
        step_mm: f64,
    ) -> Result<SessionCommand, CoreError> {
        commands::jog_command(axis, sign, step_mm, &self.config.jog_step_sizes)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
