//! Tunable layout and timing values for the Hero Chess window.

pub struct UiConfig {
    // Board layout
    pub square_size: f32,
    pub piece_size: f32,

    // Side panels
    pub tray_piece_size: f32,
    pub promo_piece_size: f32,

    // Opponent pacing
    pub reply_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            square_size: 72.0,
            piece_size: 30.0,
            tray_piece_size: 22.0,
            promo_piece_size: 50.0,
            reply_delay_ms: 400,
        }
    }
}
