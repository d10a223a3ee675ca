//! Move annotation: grades every move of a recorded game against the
//! engine's own judgement at a fixed depth.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use checkers_core::{
    make_move, move_to_notation, player_has_capture, Board, Color, EngineError, Move, VariantConfig,
};
use classical_engine::score_moves;

use crate::record::GameRecord;

/// Grade of a single move, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveClass {
    /// The only legal move.
    Forced,
    /// The best move, offering material, when every alternative is clearly worse.
    Brilliant,
    Best,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl MoveClass {
    pub const ALL: [MoveClass; 7] = [
        MoveClass::Forced,
        MoveClass::Brilliant,
        MoveClass::Best,
        MoveClass::Good,
        MoveClass::Inaccuracy,
        MoveClass::Mistake,
        MoveClass::Blunder,
    ];

    /// Moves of this grade count toward a side's accuracy.
    pub fn is_accurate(self) -> bool {
        matches!(
            self,
            MoveClass::Forced | MoveClass::Brilliant | MoveClass::Best | MoveClass::Good
        )
    }

    /// Conventional annotation glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            MoveClass::Forced | MoveClass::Best | MoveClass::Good => "",
            MoveClass::Brilliant => "!!",
            MoveClass::Inaccuracy => "?!",
            MoveClass::Mistake => "?",
            MoveClass::Blunder => "??",
        }
    }
}

impl fmt::Display for MoveClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveClass::Forced => "forced",
            MoveClass::Brilliant => "brilliant",
            MoveClass::Best => "best",
            MoveClass::Good => "good",
            MoveClass::Inaccuracy => "inaccuracy",
            MoveClass::Mistake => "mistake",
            MoveClass::Blunder => "blunder",
        };
        f.write_str(name)
    }
}

/// Score-loss limits (in hundredths of a man) for each grade.
///
/// A move losing at most `best` is best, at most `good` good, and so on;
/// anything above `mistake` is a blunder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyThresholds {
    pub best: i32,
    pub good: i32,
    pub inaccuracy: i32,
    pub mistake: i32,
    /// How much worse the best alternative must be for a sacrifice to be brilliant.
    pub brilliant_margin: i32,
}

impl Default for ClassifyThresholds {
    fn default() -> Self {
        Self {
            best: 0,
            good: 30,
            inaccuracy: 80,
            mistake: 200,
            brilliant_margin: 80,
        }
    }
}

impl ClassifyThresholds {
    /// Grade by score loss alone.
    pub fn grade(&self, loss: i32) -> MoveClass {
        if loss <= self.best {
            MoveClass::Best
        } else if loss <= self.good {
            MoveClass::Good
        } else if loss <= self.inaccuracy {
            MoveClass::Inaccuracy
        } else if loss <= self.mistake {
            MoveClass::Mistake
        } else {
            MoveClass::Blunder
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedMove {
    /// Zero-based ply index in the game.
    pub ply: usize,
    pub player: Color,
    pub played: Move,
    pub notation: String,
    /// Score of the played move, from the mover's point of view.
    pub score: i32,
    pub best_move: Move,
    pub best_score: i32,
    /// How much the played move gives away compared to the best one.
    pub loss: i32,
    pub legal_moves: usize,
    pub class: MoveClass,
}

/// Annotate every move of `record` with the default thresholds.
pub fn annotate_game(record: &GameRecord, depth: u8) -> Result<Vec<AnnotatedMove>, EngineError> {
    annotate_game_with(record, depth, &ClassifyThresholds::default())
}

/// Annotate every move of `record`, scoring all legal moves at `depth`.
pub fn annotate_game_with(
    record: &GameRecord,
    depth: u8,
    thresholds: &ClassifyThresholds,
) -> Result<Vec<AnnotatedMove>, EngineError> {
    let config = &record.variant;
    let positions = record.positions()?;
    let mut out = Vec::with_capacity(positions.len());

    for (ply, ((board, player), played)) in positions.iter().zip(&record.moves).enumerate() {
        let annotated = annotate_move(board, *player, played, config, depth, thresholds)?;
        tracing::trace!(
            ply,
            notation = %annotated.notation,
            class = %annotated.class,
            loss = annotated.loss,
            "annotated"
        );
        out.push(AnnotatedMove { ply, ..annotated });
    }
    Ok(out)
}

/// Grade `played` in a single position.
pub fn annotate_move(
    board: &Board,
    player: Color,
    played: &Move,
    config: &VariantConfig,
    depth: u8,
    thresholds: &ClassifyThresholds,
) -> Result<AnnotatedMove, EngineError> {
    let scored = score_moves(board, player, config, depth);
    let (_, score) = scored
        .iter()
        .find(|(mv, _)| mv == played)
        .ok_or_else(|| EngineError::IllegalMove(played.to_string()))?;
    let score = *score;

    // First move with the top score, so ties resolve in generator order.
    let mut best = &scored[0];
    for entry in &scored[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    let loss = (best.1 - score).max(0);

    let class = if scored.len() == 1 {
        MoveClass::Forced
    } else {
        let graded = thresholds.grade(loss);
        if graded == MoveClass::Best && is_brilliant(board, player, played, config, &scored, thresholds)? {
            MoveClass::Brilliant
        } else {
            graded
        }
    };

    Ok(AnnotatedMove {
        ply: 0,
        player,
        played: played.clone(),
        notation: move_to_notation(played, board.size()),
        score,
        best_move: best.0.clone(),
        best_score: best.1,
        loss,
        legal_moves: scored.len(),
        class,
    })
}

/// A best move is brilliant when it leaves the opponent a capture and no
/// other move comes within `brilliant_margin` of it.
fn is_brilliant(
    board: &Board,
    player: Color,
    played: &Move,
    config: &VariantConfig,
    scored: &[(Move, i32)],
    thresholds: &ClassifyThresholds,
) -> Result<bool, EngineError> {
    let after = make_move(board, played, config)?;
    if !player_has_capture(&after, player.other(), config) {
        return Ok(false);
    }
    let played_score = scored
        .iter()
        .find(|(mv, _)| mv == played)
        .map(|(_, s)| *s)
        .unwrap_or(i32::MIN);
    let runner_up = scored
        .iter()
        .filter(|(mv, _)| mv != played)
        .map(|(_, s)| *s)
        .max();
    Ok(match runner_up {
        Some(second) => played_score - second >= thresholds.brilliant_margin,
        None => false,
    })
}

/// Per-side tally of grades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub moves: u32,
    pub counts: BTreeMap<MoveClass, u32>,
    pub total_loss: i64,
}

impl SideSummary {
    pub fn count(&self, class: MoveClass) -> u32 {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    /// Share of moves graded good or better, in percent.
    pub fn accuracy(&self) -> f64 {
        if self.moves == 0 {
            return 100.0;
        }
        let accurate: u32 = self
            .counts
            .iter()
            .filter(|(class, _)| class.is_accurate())
            .map(|(_, n)| n)
            .sum();
        100.0 * accurate as f64 / self.moves as f64
    }

    pub fn average_loss(&self) -> f64 {
        if self.moves == 0 {
            return 0.0;
        }
        self.total_loss as f64 / self.moves as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSummary {
    pub red: SideSummary,
    pub black: SideSummary,
}

impl AnnotationSummary {
    pub fn side(&self, color: Color) -> &SideSummary {
        match color {
            Color::Red => &self.red,
            Color::Black => &self.black,
        }
    }
}

pub fn summarize(annotations: &[AnnotatedMove]) -> AnnotationSummary {
    let mut summary = AnnotationSummary::default();
    for a in annotations {
        let side = match a.player {
            Color::Red => &mut summary.red,
            Color::Black => &mut summary.black,
        };
        side.moves += 1;
        *side.counts.entry(a.class).or_insert(0) += 1;
        side.total_loss += a.loss as i64;
    }
    summary
}

/// Human-readable report, one line per move plus a summary per side.
pub fn render_annotations(record: &GameRecord, annotations: &[AnnotatedMove]) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== {} ({} vs {}) ===\n",
        record.variant.name,
        if record.red.is_empty() { "red" } else { record.red.as_str() },
        if record.black.is_empty() { "black" } else { record.black.as_str() },
    ));
    for a in annotations {
        let best = if a.class.is_accurate() {
            String::new()
        } else {
            format!(" (best {})", move_to_notation(&a.best_move, record.variant.size))
        };
        report.push_str(&format!(
            "{:>4}. {:<6} {:<12}{:<3} {:<10} {:>+6}{}\n",
            a.ply / 2 + 1,
            a.player.to_string(),
            a.notation,
            a.class.glyph(),
            a.class.to_string(),
            a.score,
            best
        ));
    }

    let summary = summarize(annotations);
    for color in Color::ALL {
        let side = summary.side(color);
        report.push_str(&format!(
            "\n{}: {} moves, accuracy {:.1}%, average loss {:.1}\n",
            color,
            side.moves,
            side.accuracy(),
            side.average_loss()
        ));
        for class in MoveClass::ALL {
            let n = side.count(class);
            if n > 0 {
                report.push_str(&format!("  {:<10} {}\n", class.to_string(), n));
            }
        }
    }
    report
}

#[cfg(test)]
#[path = "annotate_tests.rs"]
mod annotate_tests;
