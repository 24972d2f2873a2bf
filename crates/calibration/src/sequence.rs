//! Step sequences the robot walks each calibration session type through.

use shared::{
    domain::{CalibrationStep, SessionType},
    protocol::SessionSnapshot,
};

use CalibrationStep::*;

const DECK_CALIBRATION: &[CalibrationStep] = &[
    SessionStarted,
    LabwareLoaded,
    PreparingPipette,
    InspectingTip,
    JoggingToDeck,
    SavingPointOne,
    SavingPointTwo,
    SavingPointThree,
    CalibrationComplete,
];

const PIPETTE_OFFSET: &[CalibrationStep] = &[
    SessionStarted,
    LabwareLoaded,
    PreparingPipette,
    InspectingTip,
    JoggingToDeck,
    SavingPointOne,
    CalibrationComplete,
];

const PIPETTE_OFFSET_WITH_TIP_LENGTH: &[CalibrationStep] = &[
    SessionStarted,
    LabwareLoaded,
    MeasuringNozzleOffset,
    PreparingPipette,
    InspectingTip,
    MeasuringTipOffset,
    TipLengthComplete,
    JoggingToDeck,
    SavingPointOne,
    CalibrationComplete,
];

const TIP_LENGTH: &[CalibrationStep] = &[
    SessionStarted,
    LabwareLoaded,
    MeasuringNozzleOffset,
    PreparingPipette,
    InspectingTip,
    MeasuringTipOffset,
    CalibrationComplete,
];

const HEALTH_CHECK: &[CalibrationStep] = &[
    SessionStarted,
    LabwareLoaded,
    ComparingNozzle,
    PreparingPipette,
    InspectingTip,
    ComparingTip,
    JoggingToDeck,
    ComparingPointOne,
    ComparingPointTwo,
    ComparingPointThree,
    ReturningTip,
    ResultsSummary,
    CalibrationComplete,
];

/// Ordered steps for a session type. `with_tip_length` only matters for
/// pipette-offset sessions.
pub fn step_sequence(
    session_type: SessionType,
    with_tip_length: bool,
) -> &'static [CalibrationStep] {
    match session_type {
        SessionType::DeckCalibration => DECK_CALIBRATION,
        SessionType::PipetteOffsetCalibration if with_tip_length => PIPETTE_OFFSET_WITH_TIP_LENGTH,
        SessionType::PipetteOffsetCalibration => PIPETTE_OFFSET,
        SessionType::TipLengthCalibration => TIP_LENGTH,
        SessionType::CalibrationCheck => HEALTH_CHECK,
    }
}

pub fn sequence_for(session: &SessionSnapshot) -> &'static [CalibrationStep] {
    step_sequence(session.session_type, session.should_perform_tip_length)
}

/// Whether the session's current step is one it can legitimately report.
/// Any session may be exited at any point.
pub fn is_reachable(session: &SessionSnapshot) -> bool {
    session.current_step == SessionExited || sequence_for(session).contains(&session.current_step)
}

/// Whether tip length is measured inside this session.
pub fn measures_tip_length(session: &SessionSnapshot) -> bool {
    match session.session_type {
        SessionType::TipLengthCalibration => true,
        SessionType::PipetteOffsetCalibration => session.should_perform_tip_length,
        SessionType::DeckCalibration | SessionType::CalibrationCheck => false,
    }
}
