/// User-facing settings handed to the presentation layer at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppSettings {
    constrained_view: bool,
}

impl AppSettings {
    #[must_use]
    pub fn new(constrained_view: bool) -> Self {
        Self { constrained_view }
    }

    /// Whether the layout is limited to a phone-sized column on wide screens.
    #[must_use]
    pub fn constrained_view(&self) -> bool {
        self.constrained_view
    }

    pub fn set_constrained_view(&mut self, enabled: bool) {
        self.constrained_view = enabled;
    }
}
