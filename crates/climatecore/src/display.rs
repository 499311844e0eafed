/// Text readouts for a simulated value: the main panel and the label next to the marker
pub trait TextDisplay: Send + Sync {
    fn update_panel_text(&mut self, value: f32);
    fn update_target_text(&mut self, value: f32);
}
