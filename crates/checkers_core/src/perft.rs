use crate::{board::make_move, board::Board, rules::legal_moves_into, types::*, variant::VariantConfig};

/// Pure perft node count.
/// Counts all legal positions reachable from `board` in exactly `depth` plies.
pub fn perft(board: &Board, to_move: Color, depth: u8, config: &VariantConfig) -> u64 {
    fn inner(
        board: &Board,
        to_move: Color,
        depth: u8,
        config: &VariantConfig,
        layers: &mut [Vec<Move>],
    ) -> u64 {
        if depth == 0 {
            return 1;
        }
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };
        legal_moves_into(board, to_move, config, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter() {
            // Generated moves always apply cleanly.
            if let Ok(next) = make_move(board, mv, config) {
                nodes += inner(&next, to_move.other(), depth - 1, config, rest);
            }
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(32); depth as usize];
    inner(board, to_move, depth, config, &mut layers[..])
}
