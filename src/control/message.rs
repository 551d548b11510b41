/// Commands consumed by the motor task
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum ControlMessage {
    Goto { steps1: i64, steps2: i64 },
    StartTracking,
    StopTracking,
    /// Run axis1 toward `target` (a direction sentinel) at `speed` times sidereal
    MoveAxis1 { target: i64, speed: f64 },
    StopAxis1,
    MoveAxis2 { target: i64, speed: f64 },
    StopAxis2,
    GotoHome,
}
