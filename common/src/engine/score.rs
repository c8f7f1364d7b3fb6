#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBump {
    Increased(u32),
    /// The ceiling was already reached; the score did not change.
    MaxReached(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    current: u32,
    max_score: Option<u32>,
}

impl Score {
    pub fn new(max_score: Option<u32>) -> Self {
        Self {
            current: 0,
            max_score,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max_score(&self) -> Option<u32> {
        self.max_score
    }

    pub fn bump(&mut self) -> ScoreBump {
        if let Some(max) = self.max_score
            && self.current >= max
        {
            return ScoreBump::MaxReached(max);
        }
        self.current += 1;
        ScoreBump::Increased(self.current)
    }

}
