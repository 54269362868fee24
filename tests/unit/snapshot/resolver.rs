use super::*;
use crate::data::index::IndexOptions;
use crate::data::table::RawTable;
use crate::foundation::error::RaceError;

fn index(csv: &str) -> EntityIndex {
    let t = RawTable::from_csv_str(csv).unwrap();
    EntityIndex::build(&t, &IndexOptions::default()).unwrap()
}

#[test]
fn leader_and_rest_follow_values() {
    let idx = index("Name,2000,2001,2002\nA,10,20,30\nB,30,20,10\n");
    let r = SnapshotResolver::new(3);

    let s = r.resolve(&idx, 2000).unwrap();
    assert_eq!(s.leader.name, "B");
    assert_eq!(s.leader.value, 30.0);
    assert_eq!(s.rest.len(), 1);
    assert_eq!(s.rest[0].name, "A");
    assert_eq!(s.rest[0].value, 10.0);

    let s = r.resolve(&idx, 2002).unwrap();
    assert_eq!(s.leader.name, "A");
    assert_eq!(s.rest[0].name, "B");
}

#[test]
fn ties_keep_input_order() {
    let idx = index("Name,2000\nC,5\nA,5\nB,9\nD,5\n");
    let s = SnapshotResolver::new(10).resolve(&idx, 2000).unwrap();
    let names: Vec<_> = s.entries().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A", "D"]);
}

#[test]
fn rest_is_capped_at_top_n_minus_one() {
    let idx = index("Name,2000\nA,1\nB,2\nC,3\nD,4\nE,5\n");
    assert_eq!(SnapshotResolver::new(3).resolve(&idx, 2000).unwrap().rest.len(), 2);
    assert_eq!(SnapshotResolver::new(15).resolve(&idx, 2000).unwrap().rest.len(), 4);
    assert_eq!(SnapshotResolver::new(0).resolve(&idx, 2000).unwrap().rest.len(), 0);
}

#[test]
fn every_year_matches_source_values() {
    let idx = index("Name,2000,2001,2002\nA,1,5,2\nB,4,0,7\nC,,3,3\n");
    let r = SnapshotResolver::new(15);
    for year in idx.range().years() {
        let s = r.resolve(&idx, i64::from(year)).unwrap();
        assert_eq!(s.rest.len(), (r.top_n() - 1).min(idx.len() - 1));
        let off = (year - 2000) as usize;
        for e in s.entries() {
            assert_eq!(e.value, idx.get(&e.name).unwrap().values[off]);
        }
    }
}

#[test]
fn resolve_is_pure() {
    let idx = index("Name,2000\nA,1\nB,1\nC,2\n");
    let r = SnapshotResolver::default();
    assert_eq!(r.resolve(&idx, 2000).unwrap(), r.resolve(&idx, 2000).unwrap());
}

#[test]
fn out_of_range_year_fails() {
    let idx = index("Name,2000,2001\nA,1,2\n");
    let r = SnapshotResolver::default();
    assert!(matches!(
        r.resolve(&idx, 1999),
        Err(RaceError::OutOfRange { year: 1999, .. })
    ));
    assert!(matches!(
        r.resolve(&idx, 2002),
        Err(RaceError::OutOfRange { .. })
    ));
}
