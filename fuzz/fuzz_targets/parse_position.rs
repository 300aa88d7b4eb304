#![no_main]
use libfuzzer_sys::fuzz_target;
use pabi_hash::chess::position::Position;
use pabi_hash::chess::zobrist::ZobristTable;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(position) = Position::try_from(s) {
            let serialized = position.to_string();
            let parsed = Position::try_from(serialized.as_str())
                .expect("printed positions should be parsed back");
            assert_eq!(parsed, position);
            let table = ZobristTable::new();
            assert_eq!(table.fingerprint(&parsed), table.fingerprint(&position));
        }
    }
});
