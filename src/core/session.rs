use crate::core::backing::MapType;
use crate::core::store::RecordStore;
use crate::core::subset::UserSubset;
use crate::domain::model::Record;
use crate::loader::{self, DataSource, LoadReport, LoadedData, SourceResolver};
use crate::utils::error::{DexError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Loaded data plus the user's collection bound to it.
#[derive(Debug)]
pub struct Catalog {
    subset: UserSubset,
    report: LoadReport,
    source: DataSource,
}

impl Catalog {
    pub fn new(loaded: LoadedData) -> Self {
        Self {
            subset: UserSubset::new(Arc::new(loaded.store)),
            report: loaded.report,
            source: loaded.source,
        }
    }

    pub fn store(&self) -> &RecordStore {
        self.subset.store()
    }

    pub fn subset(&self) -> &UserSubset {
        &self.subset
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }
}

pub enum LoadState {
    Idle,
    Loading {
        map_type: MapType,
        task: JoinHandle<Result<LoadedData>>,
    },
    Ready(Catalog),
    Failed { message: String },
}

/// Result of adding a name to the user's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    NotFound,
    AlreadyOwned,
}

/// Owns the load lifecycle. Every query fails with [`DexError::NotLoaded`]
/// (or [`DexError::LoadInProgress`]) until a load has completed.
pub struct Session {
    resolver: SourceResolver,
    state: LoadState,
}

impl Session {
    pub fn new(resolver: SourceResolver) -> Self {
        Self {
            resolver,
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Resolves the data file and starts reading it on a blocking task.
    pub fn begin_load(&mut self, map_type: MapType) -> Result<()> {
        self.ensure_can_load()?;
        let resolver = self.resolver.clone();
        self.spawn(map_type, move || {
            let source = resolver.resolve()?;
            loader::load_source(source, map_type)
        });
        Ok(())
    }

    /// Starts reading an explicitly chosen file on a blocking task.
    pub fn begin_load_from_path<P: Into<PathBuf>>(&mut self, path: P, map_type: MapType) -> Result<()> {
        self.ensure_can_load()?;
        let source = DataSource::manual(path);
        self.spawn(map_type, move || loader::load_source(source, map_type));
        Ok(())
    }

    fn ensure_can_load(&self) -> Result<()> {
        match self.state {
            LoadState::Loading { .. } => Err(DexError::LoadInProgress),
            LoadState::Ready(_) => Err(DexError::AlreadyLoaded),
            LoadState::Idle | LoadState::Failed { .. } => Ok(()),
        }
    }

    fn spawn<F>(&mut self, map_type: MapType, job: F)
    where
        F: FnOnce() -> Result<LoadedData> + Send + 'static,
    {
        tracing::debug!("Starting background load with {}", map_type);
        self.state = LoadState::Loading {
            map_type,
            task: tokio::task::spawn_blocking(job),
        };
    }

    /// Waits for a running load and moves to `Ready` or `Failed`.
    ///
    /// Cancel safe: dropping the future leaves the load running.
    pub async fn finish_load(&mut self) -> Result<&Catalog> {
        if let LoadState::Loading { task, .. } = &mut self.state {
            let joined = task.await;
            let outcome = joined.map_err(|e| DexError::LoadTaskFailed {
                message: e.to_string(),
            });

            match outcome.and_then(|loaded| loaded) {
                Ok(loaded) => {
                    tracing::info!("Data ready: {} records", loaded.store.size());
                    self.state = LoadState::Ready(Catalog::new(loaded));
                }
                Err(e) => {
                    tracing::error!("Load failed: {}", e);
                    self.state = LoadState::Failed {
                        message: e.to_string(),
                    };
                    return Err(e);
                }
            }
        }

        self.catalog()
    }

    pub fn catalog(&self) -> Result<&Catalog> {
        match &self.state {
            LoadState::Ready(catalog) => Ok(catalog),
            LoadState::Loading { .. } => Err(DexError::LoadInProgress),
            LoadState::Idle | LoadState::Failed { .. } => Err(DexError::NotLoaded),
        }
    }

    fn catalog_mut(&mut self) -> Result<&mut Catalog> {
        match &mut self.state {
            LoadState::Ready(catalog) => Ok(catalog),
            LoadState::Loading { .. } => Err(DexError::LoadInProgress),
            LoadState::Idle | LoadState::Failed { .. } => Err(DexError::NotLoaded),
        }
    }

    pub fn show(&self, name: &str) -> Result<Option<&Record>> {
        Ok(self.catalog()?.store().get(name))
    }

    pub fn add(&mut self, name: &str) -> Result<AddOutcome> {
        let catalog = self.catalog_mut()?;

        if catalog.subset.add(name) {
            tracing::debug!("Added '{}' to collection", name);
            Ok(AddOutcome::Added)
        } else if catalog.store().contains(name) {
            Ok(AddOutcome::AlreadyOwned)
        } else {
            Ok(AddOutcome::NotFound)
        }
    }

    pub fn collection(&self) -> Result<Vec<&Record>> {
        Ok(self.catalog()?.subset.sorted_by_primary_category())
    }

    pub fn all_sorted(&self) -> Result<Vec<&Record>> {
        Ok(self.catalog()?.store().all_sorted_by_primary_category())
    }

    pub fn list_all(&self) -> Result<Vec<&Record>> {
        Ok(self.catalog()?.store().all())
    }

    pub fn by_ability(&self, ability: &str) -> Result<Vec<&Record>> {
        Ok(self.catalog()?.store().by_capability(ability))
    }
}
