use crate::effects::TextScramble;
use crate::model::Phase;

/// Stagger between the heading, label and subtext reveals.
const LINE_DELAYS: [f64; 3] = [0.0, 0.2, 0.4];

/// The three scrambled lines of the data terminal.
#[derive(Debug, Clone)]
pub struct TerminalReadout {
    lines: [TextScramble; 3],
}

impl TerminalReadout {
    pub fn for_phase(phase: &Phase, seed: u64) -> Self {
        let texts = [phase.name.title(), phase.label.clone(), phase.subtext.clone()];
        let lines = std::array::from_fn(|i| {
            TextScramble::new(&texts[i], LINE_DELAYS[i], seed.wrapping_add(i as u64))
        });
        Self { lines }
    }

    /// Returns the number of characters finalised across all lines.
    pub fn advance(&mut self, dt: f64) -> usize {
        self.lines.iter_mut().map(|l| l.advance(dt)).sum()
    }

    pub fn is_done(&self) -> bool {
        self.lines.iter().all(TextScramble::is_done)
    }

    /// Heading, label and subtext as currently displayed.
    pub fn lines(&self) -> [String; 3] {
        std::array::from_fn(|i| self.lines[i].display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PhaseName, abc_table};

    #[test]
    fn lines_settle_on_phase_text() {
        let table = abc_table();
        let phase = table.first();
        let mut readout = TerminalReadout::for_phase(phase, 11);
        assert_eq!(readout.lines()[2], "");
        readout.advance(10.0);
        assert!(readout.is_done());
        let [title, label, _] = readout.lines();
        assert_eq!(title, PhaseName::Hero.title());
        assert_eq!(label, phase.label);
    }
}
