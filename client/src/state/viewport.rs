/// Live stage telemetry consumed by chrome (status bar).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    pub window_width: f64,
    pub window_height: f64,
    pub stage_width: f64,
    pub stage_height: f64,
    pub scale: f64,
    pub sidebar_expanded: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            window_width: 0.0,
            window_height: 0.0,
            stage_width: 0.0,
            stage_height: 0.0,
            scale: 1.0,
            sidebar_expanded: true,
        }
    }
}
