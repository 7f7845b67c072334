/// Bare-word tokens accepted by the rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whitelists {
    /// Allowed effect names (second argument of `scenecontrol`)
    pub scene_control: &'static [&'static str],
    /// Allowed flags inside `timinggroup(...)`
    pub timing_group: &'static [&'static str],
}

impl Whitelists {
    pub const DEFAULT: Self = Self {
        scene_control: &[
            "trackdisplay",
            "redline",
            "arcahvdistort",
            "arcahvdebris",
            "hidegroup",
            "enwidencamera",
            "enwidenlanes",
        ],
        timing_group: &["anglex", "angley", "noinput", "fadingholds"],
    };

    pub fn allows_scene_control(&self, effect: &str) -> bool {
        self.scene_control.contains(&effect)
    }

    pub fn allows_timing_group(&self, flag: &str) -> bool {
        self.timing_group.contains(&flag)
    }
}

impl Default for Whitelists {
    fn default() -> Self {
        Self::DEFAULT
    }
}
