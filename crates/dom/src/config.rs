use layouter::Direction;

/// Settings for a [`DomManager`](crate::DomManager).
#[derive(Clone, Debug)]
pub struct DomConfig {
    /// Id of the root node created with the manager.
    pub root_id: u32,
    /// Width of the box the root is laid out in on commit (NaN = unconstrained).
    pub root_width: f32,
    /// Height of the box the root is laid out in on commit (NaN = unconstrained).
    pub root_height: f32,
    /// Base direction for the commit layout pass.
    pub direction: Direction,
    /// Name of the thread spawned to drain posted tasks.
    pub thread_name: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            root_id: 0,
            root_width: 1024.0,
            root_height: 768.0,
            direction: Direction::Ltr,
            thread_name: "dom".to_owned(),
        }
    }
}

impl DomConfig {
    pub fn with_root_size(mut self, width: f32, height: f32) -> Self {
        self.root_width = width;
        self.root_height = height;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
