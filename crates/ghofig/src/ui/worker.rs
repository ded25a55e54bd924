//! Background thread that runs catalog queries and config file I/O.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::warn;

use super::View;
use crate::config_file::ConfigFile;
use crate::error::{ConfigFileError, StoreError};
use crate::store::{ConfigEntry, LookupStore};

/// Screen instance that issued a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Origin {
    pub view: View,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Job {
    Search { origin: Origin, query: String },
    LoadFile { origin: Origin },
    SaveFile { origin: Origin, content: String },
    AppendLine { origin: Origin, line: String },
    CommentOut { origin: Origin, key: String },
}

#[derive(Debug)]
pub(crate) enum Completion {
    Search {
        origin: Origin,
        query: String,
        result: Result<Vec<ConfigEntry>, StoreError>,
    },
    Loaded {
        origin: Origin,
        result: Result<String, ConfigFileError>,
    },
    Saved {
        origin: Origin,
        result: Result<(), ConfigFileError>,
    },
    Appended {
        origin: Origin,
        result: Result<(), ConfigFileError>,
    },
    CommentedOut {
        origin: Origin,
        result: Result<bool, ConfigFileError>,
    },
}

impl Completion {
    pub(crate) fn origin(&self) -> Origin {
        match self {
            Self::Search { origin, .. }
            | Self::Loaded { origin, .. }
            | Self::Saved { origin, .. }
            | Self::Appended { origin, .. }
            | Self::CommentedOut { origin, .. } => *origin,
        }
    }
}

/// Sink for background jobs.
pub(crate) trait Dispatch {
    fn dispatch(&mut self, job: Job);
}

impl Dispatch for Vec<Job> {
    fn dispatch(&mut self, job: Job) {
        self.push(job);
    }
}

pub(crate) fn execute(job: Job, store: &LookupStore, config: &ConfigFile) -> Completion {
    match job {
        Job::Search { origin, query } => {
            let result = store.search(&query);
            if let Err(err) = &result {
                warn!(query = query.as_str(), error = %err, "catalog search failed");
            }
            Completion::Search {
                origin,
                query,
                result,
            }
        }
        Job::LoadFile { origin } => Completion::Loaded {
            origin,
            result: config.read_all().inspect_err(log_file_error),
        },
        Job::SaveFile { origin, content } => Completion::Saved {
            origin,
            result: config.write_all(&content).inspect_err(log_file_error),
        },
        Job::AppendLine { origin, line } => Completion::Appended {
            origin,
            result: config.append_line(&line).inspect_err(log_file_error),
        },
        Job::CommentOut { origin, key } => Completion::CommentedOut {
            origin,
            result: config.comment_out(&key).inspect_err(log_file_error),
        },
    }
}

fn log_file_error(err: &ConfigFileError) {
    warn!(error = %err, "config file operation failed");
}

/// Runs jobs one at a time, in submission order, off the UI thread.
pub(crate) struct Worker {
    jobs: Option<Sender<Job>>,
    completions: Receiver<Completion>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(crate) fn spawn(store: LookupStore, config: ConfigFile) -> anyhow::Result<Self> {
        let (job_tx, job_rx) = unbounded::<Job>();
        let (done_tx, done_rx) = unbounded::<Completion>();
        let handle = thread::Builder::new()
            .name("ghofig-worker".to_string())
            .spawn(move || {
                for job in job_rx {
                    if done_tx.send(execute(job, &store, &config)).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self {
            jobs: Some(job_tx),
            completions: done_rx,
            handle: Some(handle),
        })
    }

    pub(crate) fn try_completion(&self) -> Option<Completion> {
        match self.completions.try_recv() {
            Ok(done) => Some(done),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

impl Dispatch for Worker {
    fn dispatch(&mut self, job: Job) {
        let Some(jobs) = self.jobs.as_ref() else {
            return;
        };
        if jobs.send(job).is_err() {
            warn!("background worker stopped; job dropped");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EMBEDDED_CATALOG;
    use std::time::Duration;

    fn origin() -> Origin {
        Origin {
            view: View::Detail,
            epoch: 7,
        }
    }

    #[test]
    fn execute_runs_file_jobs_against_config() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ConfigFile::new(dir.path().join("config"));
        let store = LookupStore::from_embedded(EMBEDDED_CATALOG).expect("open catalog");

        let done = execute(
            Job::AppendLine {
                origin: origin(),
                line: "theme = dark".to_string(),
            },
            &store,
            &config,
        );
        assert!(matches!(done, Completion::Appended { result: Ok(()), .. }));
        assert_eq!(done.origin(), origin());

        let done = execute(
            Job::CommentOut {
                origin: origin(),
                key: "theme".to_string(),
            },
            &store,
            &config,
        );
        assert!(matches!(done, Completion::CommentedOut { result: Ok(true), .. }));

        let done = execute(Job::LoadFile { origin: origin() }, &store, &config);
        match done {
            Completion::Loaded { result, .. } => {
                assert_eq!(result.expect("load file"), "# theme = dark\n");
            }
            other => panic!("unexpected completion {other:?}"),
        }
    }

    #[test]
    fn spawned_worker_answers_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ConfigFile::new(dir.path().join("config"));
        let store = LookupStore::from_embedded(EMBEDDED_CATALOG).expect("open catalog");
        let mut worker = Worker::spawn(store, config).expect("spawn worker");

        for query in ["font", "theme"] {
            worker.dispatch(Job::Search {
                origin: origin(),
                query: query.to_string(),
            });
        }

        let mut answered = Vec::new();
        while answered.len() < 2 {
            let done = worker
                .completions
                .recv_timeout(Duration::from_secs(5))
                .expect("worker completion");
            if let Completion::Search { query, result, .. } = done {
                assert!(!result.expect("search result").is_empty());
                answered.push(query);
            }
        }
        assert_eq!(answered, vec!["font".to_string(), "theme".to_string()]);
        assert!(worker.try_completion().is_none());
    }
}
