//! The classic movie database used by `relalg demo`.

use relalg_core::prelude::{IndexKind, Result, Schema, Table};
use relalg_core::values;

pub struct MovieDb {
    pub movie: Table,
    pub cinema: Table,
    pub movie_star: Table,
    pub stars_in: Table,
    pub movie_exec: Table,
    pub studio: Table,
}

fn table(name: &str, attributes: &str, domains: &str, key: &str, kind: IndexKind) -> Result<Table> {
    Ok(Table::with_index(name, Schema::parse(attributes, domains, key)?, kind))
}

impl MovieDb {
    pub fn build(kind: IndexKind) -> Result<Self> {
        let movie_attrs = "title year length genre studioName producerNo";
        let movie_domains = "String Integer Integer String String Integer";

        let mut movie = table("movie", movie_attrs, movie_domains, "title year", kind)?;
        movie.insert_all([
            values!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345],
            values!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345],
            values!["Rocky", 1985, 200, "action", "Universal", 12125],
            values!["Rambo", 1978, 100, "action", "Universal", 32355],
        ])?;

        let mut cinema = table("cinema", movie_attrs, movie_domains, "title year", kind)?;
        cinema.insert_all([
            values!["Rocky", 1985, 200, "action", "Universal", 12125],
            values!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890],
        ])?;

        let mut movie_star = table(
            "movieStar",
            "name address gender birthdate",
            "String String Character String",
            "name",
            kind,
        )?;
        movie_star.insert_all([
            values!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"],
            values!["Mark_Hamill", "Brentwood", 'M', "8/8/88"],
            values!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"],
        ])?;

        let mut stars_in = table(
            "starsIn",
            "movieTitle movieYear starName",
            "String Integer String",
            "movieTitle movieYear starName",
            kind,
        )?;
        stars_in.insert_all([
            values!["Star_Wars", 1977, "Carrie_Fisher"],
            values!["Star_Wars", 1977, "Mark_Hamill"],
            values!["Star_Wars_2", 1980, "Harrison_Ford"],
        ])?;

        let mut movie_exec = table(
            "movieExec",
            "certNo name address fee",
            "Integer String String Double",
            "certNo",
            kind,
        )?;
        movie_exec.insert_all([
            values![9999, "S_Spielberg", "Hollywood", 10000.00],
            values![8888, "G_Lucas", "Brentwood", 12000.00],
            values![7777, "J_Brand", "Los_Angeles", 15000.00],
        ])?;

        let mut studio = table("studio", "name address presNo", "String String Integer", "name", kind)?;
        studio.insert_all([
            values!["Fox", "Los_Angeles", 7777],
            values!["Universal", "Universal_City", 8888],
            values!["DreamWorks", "Universal_City", 9999],
        ])?;

        Ok(Self {
            movie,
            cinema,
            movie_star,
            stars_in,
            movie_exec,
            studio,
        })
    }

    pub fn tables(&self) -> [&Table; 6] {
        [
            &self.movie,
            &self.cinema,
            &self.movie_star,
            &self.stars_in,
            &self.movie_exec,
            &self.studio,
        ]
    }
}
