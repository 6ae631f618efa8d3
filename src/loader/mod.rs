//! Turning a delimited data file into a populated [`RecordStore`].

pub mod csv_reader;
pub mod resolver;
pub mod resource;

use crate::core::backing::MapType;
use crate::core::store::RecordStore;
use crate::utils::error::Result;

pub use csv_reader::LoadReport;
pub use resolver::{DataSource, SourceOrigin, SourceResolver};

/// A fully read data set.
#[derive(Debug)]
pub struct LoadedData {
    pub store: RecordStore,
    pub report: LoadReport,
    pub source: DataSource,
}

/// Reads `source` into a new store. Blocking; either the whole file is read or
/// an error is returned and the partial store is dropped.
pub fn load_source(source: DataSource, map_type: MapType) -> Result<LoadedData> {
    tracing::info!("Loading data from {} with {}", source, map_type);

    let mut store = RecordStore::new(map_type);
    let report = csv_reader::read_records(source.open()?, &mut store)?;

    if report.skipped() > 0 {
        tracing::warn!("Skipped {} malformed rows", report.skipped());
    }
    tracing::info!("Loaded {} records", store.size());

    Ok(LoadedData {
        store,
        report,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bundled_source() {
        let source = DataSource::Packaged {
            file_name: resource::BUNDLED_FILE_NAME.to_string(),
            contents: resource::packaged_resource(resource::BUNDLED_FILE_NAME).unwrap(),
        };

        let loaded = load_source(source, MapType::Sorted).unwrap();
        assert_eq!(loaded.report.skipped(), 0);
        assert_eq!(loaded.store.size(), loaded.report.accepted);
        assert!(loaded.store.contains("Pikachu"));
        assert_eq!(loaded.store.map_type(), MapType::Sorted);
        assert_eq!(loaded.source.origin(), SourceOrigin::Packaged);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_source(DataSource::manual("/no/such/dir/data.csv"), MapType::Hash);
        assert!(result.is_err());
    }
}
