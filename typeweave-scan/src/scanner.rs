//! Directory walk and result cache.

use crate::config::ScannerConfig;
use crate::error::ScanError;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Finds candidate plugin files below a set of roots.
///
/// Results are cached for [`ScannerConfig::freshness`]; queries inside the
/// window reuse the last scan. [`invalidate`](PluginScanner::invalidate)
/// forces the next query to rescan.
pub struct PluginScanner {
    rules: Rules,
    roots: Vec<PathBuf>,
    config: ScannerConfig,
    cache: Mutex<Option<Scan>>,
}

/// Lower-cased matching rules taken from the config.
struct Rules {
    ignore_marker: String,
    dependency_dir: String,
    skip_dir: String,
    extensions: Vec<String>,
    excluded_fragment: String,
}

struct Scan {
    at: Instant,
    all: Arc<[PathBuf]>,
    search: Arc<[PathBuf]>,
    by_stem: HashMap<String, Arc<[PathBuf]>>,
}

struct Pending {
    dir: PathBuf,
    dependency: bool,
}

impl PluginScanner {
    /// Create a scanner. Fails if no extensions or no ignore marker are set.
    pub fn new(config: ScannerConfig) -> Result<Self, ScanError> {
        let extensions: Vec<String> = config
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if extensions.is_empty() {
            return Err(ScanError::InvalidConfig("no file extensions".into()));
        }
        if config.ignore_marker.is_empty() {
            return Err(ScanError::InvalidConfig("empty ignore marker".into()));
        }

        let mut roots = Vec::new();
        let mut seen = BTreeSet::new();
        for root in &config.roots {
            let root = match std::path::absolute(root) {
                Ok(root) => root,
                Err(err) => {
                    tracing::error!(
                        root = %root.display(),
                        error = %err,
                        "typeweave.scan.bad_root"
                    );
                    continue;
                }
            };
            if seen.insert(root.clone()) {
                roots.push(root);
            }
        }

        Ok(Self {
            rules: Rules {
                ignore_marker: config.ignore_marker.to_lowercase(),
                dependency_dir: config.dependency_dir.to_lowercase(),
                skip_dir: config.skip_dir.to_lowercase(),
                extensions,
                excluded_fragment: config.excluded_fragment.to_lowercase(),
            },
            roots,
            config,
            cache: Mutex::new(None),
        })
    }

    /// The configuration this scanner was built from.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Every accepted file, including those below dependency directories.
    pub fn all_files(&self) -> Arc<[PathBuf]> {
        self.with_scan(|scan| Arc::clone(&scan.all))
    }

    /// Accepted files outside dependency directories.
    pub fn search_files(&self) -> Arc<[PathBuf]> {
        self.with_scan(|scan| Arc::clone(&scan.search))
    }

    /// Files from [`all_files`](PluginScanner::all_files) whose name without
    /// extension equals `stem`, ignoring case.
    pub fn find(&self, stem: &str) -> Arc<[PathBuf]> {
        let key = stem.to_lowercase();
        self.with_scan(|scan| {
            if let Some(found) = scan.by_stem.get(&key) {
                return Arc::clone(found);
            }
            let found: Arc<[PathBuf]> = scan
                .all
                .iter()
                .filter(|path| {
                    path.file_stem()
                        .is_some_and(|s| s.to_string_lossy().to_lowercase() == key)
                })
                .cloned()
                .collect();
            scan.by_stem.insert(key.clone(), Arc::clone(&found));
            found
        })
    }

    /// Drop the cached result so the next query rescans.
    pub fn invalidate(&self) {
        *self.cache.lock() = None;
    }

    fn with_scan<R>(&self, f: impl FnOnce(&mut Scan) -> R) -> R {
        let mut cache = self.cache.lock();
        let fresh = cache
            .as_ref()
            .is_some_and(|scan| scan.at.elapsed() < self.config.freshness);
        if !fresh {
            *cache = None;
        }
        let scan = cache.get_or_insert_with(|| self.scan());
        f(scan)
    }

    fn scan(&self) -> Scan {
        let started = Instant::now();
        let mut all = BTreeSet::new();
        let mut search = BTreeSet::new();
        let mut visited = HashSet::new();

        for root in &self.roots {
            let mut queue = VecDeque::from([Pending {
                dir: root.clone(),
                dependency: false,
            }]);
            while let Some(pending) = queue.pop_front() {
                // Linked directories are walked once per scan, which also ends link cycles.
                let canonical =
                    fs::canonicalize(&pending.dir).unwrap_or_else(|_| pending.dir.clone());
                if !visited.insert(canonical) {
                    tracing::trace!(directory = %pending.dir.display(), "typeweave.scan.revisit");
                    continue;
                }
                match self.visit(&pending, &mut queue) {
                    Ok(files) => {
                        for file in files {
                            if !pending.dependency {
                                search.insert(file.clone());
                            }
                            all.insert(file);
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "typeweave.scan.unreadable");
                    }
                }
            }
        }

        tracing::debug!(
            search = search.len(),
            all = all.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "typeweave.scan.completed"
        );

        Scan {
            at: Instant::now(),
            all: all.into_iter().collect(),
            search: search.into_iter().collect(),
            by_stem: HashMap::new(),
        }
    }

    /// Enumerate one directory: queue its subdirectories and return its
    /// accepted files. A directory holding the ignore marker yields nothing.
    fn visit(
        &self,
        pending: &Pending,
        queue: &mut VecDeque<Pending>,
    ) -> Result<Vec<PathBuf>, ScanError> {
        let entries = fs::read_dir(&pending.dir)
            .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
            .map_err(|source| ScanError::Directory {
                path: pending.dir.clone(),
                source,
            })?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let mut file_type = entry.file_type().map_err(|source| ScanError::Directory {
                path: pending.dir.clone(),
                source,
            })?;
            if file_type.is_symlink() {
                file_type = match fs::metadata(entry.path()) {
                    Ok(target) => target.file_type(),
                    Err(err) => {
                        tracing::trace!(
                            path = %entry.path().display(),
                            error = %err,
                            "typeweave.scan.dangling_link"
                        );
                        continue;
                    }
                };
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if file_type.is_dir() {
                dirs.push((name, entry.path()));
            } else {
                if name == self.rules.ignore_marker {
                    tracing::trace!(directory = %pending.dir.display(), "typeweave.scan.ignored");
                    return Ok(Vec::new());
                }
                files.push((name, entry.path()));
            }
        }

        for (name, dir) in dirs {
            if name == self.rules.skip_dir {
                continue;
            }
            queue.push_back(Pending {
                dir,
                dependency: pending.dependency || name == self.rules.dependency_dir,
            });
        }

        Ok(files
            .into_iter()
            .filter(|(name, path)| self.accepts(name, path))
            .map(|(_, path)| path)
            .collect())
    }

    fn accepts(&self, name: &str, path: &Path) -> bool {
        let extension_ok = path.extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            self.rules.extensions.iter().any(|accepted| *accepted == ext)
        });
        let excluded = !self.rules.excluded_fragment.is_empty()
            && name.contains(&self.rules.excluded_fragment);
        extension_ok && !excluded
    }
}

impl std::fmt::Debug for PluginScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginScanner")
            .field("roots", &self.roots)
            .field("cached", &self.cache.lock().is_some())
            .finish()
    }
}
