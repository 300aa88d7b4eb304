use pabi_hash::chess::core::Move;
use pabi_hash::chess::position::Position;
use pabi_hash::chess::zobrist::{KeyPair, ZobristTable};
use pabi_hash::evaluation::Score;
use pabi_hash::search::flush::FlushCache;
use pabi_hash::search::recency::RecencyCache;
use pabi_hash::search::transposition::{
    Cache,
    CacheConfig,
    Entry,
    Strategy,
    TranspositionCache,
};
use pretty_assertions::assert_eq;

fn caches(max_size: usize) -> Vec<Box<dyn TranspositionCache<Entry>>> {
    vec![
        Box::new(RecencyCache::new(max_size).unwrap()),
        Box::new(FlushCache::new(max_size).unwrap()),
        Box::new(
            CacheConfig::new(Strategy::Recency, max_size)
                .unwrap()
                .build::<Entry>()
                .unwrap(),
        ),
        Box::new(
            CacheConfig::new(Strategy::Flush, max_size)
                .unwrap()
                .build::<Entry>()
                .unwrap(),
        ),
    ]
}

#[test]
fn absent_then_present() {
    let table = ZobristTable::new();
    let position = Position::starting();
    let fingerprint = table.fingerprint(&position);
    let best_move = Entry::from(Move::from_uci("e2e4").unwrap());
    for mut cache in caches(16) {
        assert_eq!(cache.get(fingerprint), None);
        cache.add(fingerprint, best_move);
        assert_eq!(cache.get(fingerprint), Some(&best_move));
        assert_eq!(cache.size(), 1);
    }
}

#[test]
fn overwrite_does_not_grow() {
    let fingerprint = KeyPair::new(-17, 42);
    for mut cache in caches(16) {
        cache.add(fingerprint, Entry::from(Score::from(10)));
        cache.add(fingerprint, Entry::from(Score::from(-10)));
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get(fingerprint), Some(&Entry::from(Score::from(-10))));
    }
}

#[test]
fn size_is_bounded() {
    for mut cache in caches(5) {
        for low in 0..100 {
            for high in 0..3 {
                cache.add(KeyPair::new(low, high), Entry::from(Score::from(low)));
                assert!(cache.size() <= cache.max_size());
            }
        }
        assert_eq!(cache.max_size(), 5);
        cache.clear();
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.get(KeyPair::new(99, 0)), None);
    }
}

#[test]
fn recency_counts_groups() {
    let mut cache = RecencyCache::new(2).unwrap();
    let a = KeyPair::new(1, 1);
    let b = KeyPair::new(2, 1);
    let c = KeyPair::new(3, 1);
    cache.add(a, "a");
    cache.add(KeyPair::new(1, 2), "a'");
    cache.add(b, "b");
    assert_eq!(cache.size(), 2);
    assert_eq!(cache.get(a), Some(&"a"));
    cache.add(c, "c");
    assert_eq!(cache.size(), 2);
    assert_eq!(cache.get(b), None);
    assert_eq!(cache.get(KeyPair::new(1, 2)), Some(&"a'"));
    assert_eq!(cache.get(c), Some(&"c"));
}

#[test]
fn flush_counts_entries() {
    let mut cache = FlushCache::new(3).unwrap();
    for high in 0..3 {
        cache.add(KeyPair::new(0, high), high);
    }
    assert_eq!(cache.size(), 3);
    cache.add(KeyPair::new(1, 0), 3);
    assert_eq!(cache.size(), 1);
    for high in 0..3 {
        assert_eq!(cache.get(KeyPair::new(0, high)), None);
    }
    assert_eq!(cache.get(KeyPair::new(1, 0)), Some(&3));
}

#[test]
fn search_workflow() {
    let table = ZobristTable::new();
    let mut config = CacheConfig::default();
    config.set_option(CacheConfig::POLICY_OPTION, "flush").unwrap();
    config.set_option(CacheConfig::SIZE_OPTION, "1024").unwrap();
    let mut cache: Cache<Entry> = config.build().unwrap();
    assert!(matches!(cache, Cache::Flush(_)));

    let positions = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6",
    ];
    for (index, input) in positions.iter().enumerate() {
        let position = Position::try_from(*input).unwrap();
        let fingerprint = table.fingerprint(&position);
        assert_eq!(cache.get(fingerprint), None);
        cache.add(fingerprint, Entry::from(Score::from(index as i32)));
    }
    for (index, input) in positions.iter().enumerate() {
        let fingerprint = table.fingerprint(&Position::try_from(*input).unwrap());
        assert_eq!(
            cache.get(fingerprint),
            Some(&Entry::Score(Score::from(index as i32)))
        );
    }
    assert_eq!(cache.size(), positions.len());
}
