//! Small movie database shared by the unit tests.

use relalg_core::prelude::*;

pub(crate) fn movie() -> Table {
    let mut t = Table::parse(
        "movie",
        "title year length genre studioName producerNo",
        "String Integer Integer String String Integer",
        "title year",
    )
    .unwrap();
    t.insert_all([
        values!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345],
        values!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345],
        values!["Rocky", 1985, 200, "action", "Universal", 12125],
        values!["Rambo", 1978, 100, "action", "Universal", 32355],
    ])
    .unwrap();
    t
}

pub(crate) fn cinema() -> Table {
    let mut t = Table::parse(
        "cinema",
        "title year length genre studioName producerNo",
        "String Integer Integer String String Integer",
        "title year",
    )
    .unwrap();
    t.insert_all([
        values!["Rocky", 1985, 200, "action", "Universal", 12125],
        values!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890],
    ])
    .unwrap();
    t
}

pub(crate) fn studio() -> Table {
    let mut t = Table::parse("studio", "name address presNo", "String String Integer", "name").unwrap();
    t.insert_all([
        values!["Fox", "Los_Angeles", 7777],
        values!["Universal", "Universal_City", 8888],
        values!["DreamWorks", "Universal_City", 9999],
    ])
    .unwrap();
    t
}

pub(crate) fn movie_star() -> Table {
    let mut t = Table::parse(
        "movieStar",
        "name address gender birthdate",
        "String String Character String",
        "name",
    )
    .unwrap();
    t.insert_all([
        values!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"],
        values!["Mark_Hamill", "Brentwood", 'M', "8/8/88"],
        values!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"],
    ])
    .unwrap();
    t
}

pub(crate) fn stars_in() -> Table {
    let mut t = Table::parse(
        "starsIn",
        "movieTitle movieYear starName",
        "String Integer String",
        "movieTitle movieYear starName",
    )
    .unwrap();
    t.insert_all([
        values!["Star_Wars", 1977, "Carrie_Fisher"],
        values!["Star_Wars", 1977, "Mark_Hamill"],
        values!["Star_Wars_2", 1980, "Harrison_Ford"],
    ])
    .unwrap();
    t
}

pub(crate) fn rows(t: &Table) -> Vec<Vec<Value>> {
    t.tuples().iter().map(|r| r.values().to_vec()).collect()
}
