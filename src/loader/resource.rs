//! Data files compiled into the binary.

/// File name the bundled sample data set is published under.
pub const BUNDLED_FILE_NAME: &str = "pokemon_data_pokeapi.csv";

const BUNDLED_DATA: &str = include_str!("../../data/pokemon_data_pokeapi.csv");

/// Looks up a bundled data file by its bare file name.
pub fn packaged_resource(file_name: &str) -> Option<&'static str> {
    match file_name {
        BUNDLED_FILE_NAME => Some(BUNDLED_DATA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_data_is_available() {
        let data = packaged_resource(BUNDLED_FILE_NAME).unwrap();
        assert!(data.starts_with("Name,Pokedex Number"));
        assert!(packaged_resource("other.csv").is_none());
    }
}
