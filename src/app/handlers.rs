//! Applying finished async work to the dashboard.

use super::{App, AppMessage};
use crate::traits::HttpClient;

impl<H: HttpClient + Clone + 'static> App<H> {
    /// Handle an incoming async message.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Health(result) => self.dashboard.on_health(result),
            AppMessage::LatestSensor(result) => self.dashboard.on_latest_sensor(result),
            AppMessage::SensorHistory(result) => self.dashboard.on_sensor_history(result),
            AppMessage::Throughput(result) => self.dashboard.on_throughput(result),
            AppMessage::RecentHistory { source, result } => {
                self.dashboard.on_recent_history(source, result);
                self.cursor = 0;
            }
            AppMessage::ImageLoaded { source, result } => {
                self.dashboard.on_image_loaded(&source, result)
            }
            AppMessage::ClearHistoryFinished(result) => {
                self.dashboard.finish_clear_history(result);
                self.clamp_cursor();
            }
            AppMessage::DisplayModeFinished {
                device_id,
                mode,
                result,
            } => self.dashboard.on_display_mode(&device_id, mode, result),
        }
    }
}
