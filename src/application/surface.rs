// Output seams: where charts and widgets end up
use crate::domain::chart::ChartSpec;
use crate::domain::readings::{CurrentReading, SunTimes};

/// Opaque chart drawing capability, addressed by canvas identifier.
pub trait ChartSurface: Send + Sync {
    fn draw_chart(&self, canvas: &str, chart: &ChartSpec);
}

/// Text widgets: current values, sun times and the transient details overlay.
pub trait WidgetSurface: Send + Sync {
    fn show_reading(&self, reading: &CurrentReading);

    fn show_sun_times(&self, sun: &SunTimes);

    /// Open an overlay on `metric`'s current value widget and return its token.
    fn show_details(&self, metric: &str, text: &str) -> u64;

    /// Close the overlay if `token` still identifies the one on display.
    fn dismiss_details(&self, metric: &str, token: u64);
}
