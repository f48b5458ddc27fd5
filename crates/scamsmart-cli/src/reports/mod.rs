mod tables;

pub use self::tables::{
    breakdowns as breakdown_table, deck as deck_table, indicator_board, round as round_table,
    tally as tally_table, DeckRow,
};
