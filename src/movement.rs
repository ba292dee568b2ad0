use crate::boards::Board;
use crate::castle_rights::CastleSide;
use crate::pieces::*;
use crate::squares::*;

// Movement rules, one generator per piece kind. All of them are pure
// functions of a board snapshot: they never look at whose turn it is and
// never ask whether the mover's own king ends up attacked. That is left to
// `Board::is_legal`.
//
// `capture` controls what happens when a slide meets an enemy piece: with
// it set the ray stops on that square (inclusive), without it the ray runs
// on through enemy pieces. Friendly pieces always stop a ray and are never
// included.

const ORTHOGONALS: [Offset; 4] = [Offset(1, 0), Offset(-1, 0), Offset(0, 1), Offset(0, -1)];
const DIAGONALS: [Offset; 4] = [Offset(1, 1), Offset(1, -1), Offset(-1, 1), Offset(-1, -1)];
const KNIGHT_JUMPS: [Offset; 8] = [
    Offset(-2, -1),
    Offset(-2, 1),
    Offset(-1, -2),
    Offset(-1, 2),
    Offset(1, -2),
    Offset(1, 2),
    Offset(2, -1),
    Offset(2, 1),
];
const KING_STEPS: [Offset; 8] = [
    Offset(1, 0),
    Offset(-1, 0),
    Offset(0, 1),
    Offset(0, -1),
    Offset(1, 1),
    Offset(1, -1),
    Offset(-1, 1),
    Offset(-1, -1),
];

/// Destinations reachable by a `kind` piece of `player` standing on `origin`.
pub fn destinations(
    board: &Board,
    kind: PieceKind,
    player: Color,
    origin: Square,
    capture: bool,
) -> Vec<Square> {
    match kind {
        PieceKind::Pawn => pawn_moves(board, player, origin),
        PieceKind::Knight => knight_moves(board, player, origin),
        PieceKind::Bishop => bishop_moves(board, player, origin, capture),
        PieceKind::Rook => rook_moves(board, player, origin, capture),
        PieceKind::Queen => queen_moves(board, player, origin, capture),
        PieceKind::King => king_moves(board, player, origin),
    }
}

/// Squares a `kind` piece of `player` on `origin` attacks. Differs from
/// `destinations` for pawns (diagonals only, occupied or not) and kings (no
/// castling).
pub fn attacks(board: &Board, kind: PieceKind, player: Color, origin: Square) -> Vec<Square> {
    match kind {
        PieceKind::Pawn => [1, -1]
            .iter()
            .filter_map(|&side| origin + Offset(forward(player), side))
            .collect(),
        PieceKind::King => jumps(board, player, origin, &KING_STEPS),
        _ => destinations(board, kind, player, origin, true),
    }
}

/// Row direction a pawn of `player` advances in.
fn forward(player: Color) -> i8 {
    -player.sign()
}

/// Row of an en passant target that `player` may capture onto.
pub(crate) fn en_passant_row(player: Color) -> u8 {
    let pusher = player.opposite();
    (pusher.pawn_row() as i8 + forward(pusher)) as u8
}

pub fn pawn_moves(board: &Board, player: Color, origin: Square) -> Vec<Square> {
    let mut res = Vec::new();
    let dir = forward(player);
    let steps = if origin.row() == player.pawn_row() { 2 } else { 1 };

    // A blocked first step blocks the double push as well
    let mut current = origin;
    for _ in 0..steps {
        match current + Offset(dir, 0) {
            Some(next) if board[next].is_empty() => {
                res.push(next);
                current = next;
            }
            _ => break,
        }
    }

    for &side in [1, -1].iter() {
        if let Some(target) = origin + Offset(dir, side) {
            if board[target].is_enemy_of(player) {
                res.push(target);
            } else if board.en_passant() == Some(target)
                && target.row() == en_passant_row(player)
                && passed_pawn_beside(board, player, origin, side)
            {
                res.push(target);
            }
        }
    }
    res
}

/// The square next to `origin` holds an enemy pawn that can be taken en passant.
fn passed_pawn_beside(board: &Board, player: Color, origin: Square, side: i8) -> bool {
    match origin + Offset(0, side) {
        Some(beside) => board[beside].is(PieceKind::Pawn, player.opposite()),
        None => false,
    }
}

pub fn knight_moves(board: &Board, player: Color, origin: Square) -> Vec<Square> {
    jumps(board, player, origin, &KNIGHT_JUMPS)
}

pub fn bishop_moves(board: &Board, player: Color, origin: Square, capture: bool) -> Vec<Square> {
    ray_cast(board, player, origin, &DIAGONALS, capture)
}

pub fn rook_moves(board: &Board, player: Color, origin: Square, capture: bool) -> Vec<Square> {
    ray_cast(board, player, origin, &ORTHOGONALS, capture)
}

pub fn queen_moves(board: &Board, player: Color, origin: Square, capture: bool) -> Vec<Square> {
    let mut res = ray_cast(board, player, origin, &ORTHOGONALS, capture);
    res.extend(ray_cast(board, player, origin, &DIAGONALS, capture));
    res
}

/// Single steps plus castling. Castling is offered whenever the right is
/// held, king and rook are on their home squares and the path between them
/// is empty; attacked squares are checked by `Board::is_legal`.
pub fn king_moves(board: &Board, player: Color, origin: Square) -> Vec<Square> {
    let mut res = jumps(board, player, origin, &KING_STEPS);

    if origin != CastleSide::king_square(player) {
        return res;
    }
    for &side in CastleSide::BOTH.iter() {
        let path_clear = side
            .path_cols()
            .iter()
            .all(|&col| board[Square::from_row_col(origin.row(), col)].is_empty());
        if board.castling().has(player, side)
            && board[side.rook_square(player)].is(PieceKind::Rook, player)
            && path_clear
        {
            res.push(Square::from_row_col(origin.row(), side.king_dest_col()));
        }
    }
    res
}

fn jumps(board: &Board, player: Color, origin: Square, offsets: &[Offset]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|off| origin + off)
        .filter(|&sq| !board[sq].belongs_to(player))
        .collect()
}

fn ray_cast(
    board: &Board,
    player: Color,
    origin: Square,
    directions: &[Offset],
    capture: bool,
) -> Vec<Square> {
    let mut res = Vec::new();
    for dir in directions {
        let mut current = origin;
        while let Some(next) = current + dir {
            let target = board[next];
            if target.belongs_to(player) {
                break;
            }
            res.push(next);
            if capture && !target.is_empty() {
                break;
            }
            current = next;
        }
    }
    res
}
