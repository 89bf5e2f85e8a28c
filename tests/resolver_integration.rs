//! Integration tests for the resolution cascade with stub providers

use async_trait::async_trait;
use clio::catalog::Catalog;
use clio::core::{ProviderError, ResolveError, ResolverConfig};
use clio::intent::{extract_keywords, Resolver};
use clio::providers::{
    ManPageHit, ManPageProvider, ModuleHit, ModuleProvider, RemoteHit, RemoteProvider, Source,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct StubMan {
    hits: Vec<ManPageHit>,
    fail: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl ManPageProvider for StubMan {
    async fn search_man_pages(&self, keywords: &[String]) -> Result<Vec<ManPageHit>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = keywords.to_vec();
        if self.fail {
            return Err(ProviderError::Unavailable("man not found".into()));
        }
        Ok(self.hits.clone())
    }
}

#[derive(Default)]
struct StubModules {
    hits: Vec<ModuleHit>,
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl ModuleProvider for StubModules {
    async fn search_modules(&self, _keywords: &[String]) -> Result<Vec<ModuleHit>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::Query("store locked".into()));
        }
        Ok(self.hits.clone())
    }
}

#[derive(Default)]
struct StubRemote {
    hits: Vec<RemoteHit>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Option<String>>,
}

#[async_trait]
impl RemoteProvider for StubRemote {
    async fn search_remote(&self, input: &str) -> Result<Vec<RemoteHit>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = Some(input.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ProviderError::Timeout);
        }
        Ok(self.hits.clone())
    }
}

fn man_hit(name: &str, score: u32) -> ManPageHit {
    ManPageHit {
        name: name.into(),
        description: format!("{} manual page", name),
        score,
    }
}

fn module_hit(command: &str) -> ModuleHit {
    ModuleHit {
        command: command.into(),
        description: "Module workflow".into(),
        tags: vec!["demo".into()],
    }
}

fn remote_hit(name: &str, usage: &str) -> RemoteHit {
    RemoteHit {
        name: name.into(),
        description: "Remote suggestion".into(),
        usage: usage.into(),
    }
}

/// An empty catalog forces every request past the static tier
fn empty_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::default())
}

fn cascade(
    catalog: Arc<Catalog>,
    man: &Arc<StubMan>,
    modules: &Arc<StubModules>,
    remote: &Arc<StubRemote>,
) -> Resolver {
    Resolver::new(ResolverConfig::default(), catalog)
        .with_man_pages(man.clone())
        .with_modules(modules.clone())
        .with_remote(remote.clone())
}

fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

#[tokio::test]
async fn test_copy_a_file_resolves_statically() {
    let man = Arc::new(StubMan::default());
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(Catalog::builtin().clone(), &man, &modules, &remote);

    assert_eq!(extract_keywords("how do I copy a file?"), vec!["cp", "file"]);

    let result = resolver.resolve("how do I copy a file?").await.unwrap();
    assert_eq!(result.command, "cp");
    assert_eq!(result.source, Source::Static);
    assert_eq!(result.confidence, 1.0);

    // static hit never touches a provider
    assert_eq!(calls(&man.calls), 0);
    assert_eq!(calls(&modules.calls), 0);
    assert_eq!(calls(&remote.calls), 0);
}

#[tokio::test]
async fn test_duplicate_directory_resolves_statically() {
    let resolver = Resolver::new(ResolverConfig::default(), Catalog::builtin().clone());

    assert_eq!(extract_keywords("duplicate directory"), vec!["cp", "directory"]);

    let result = resolver.resolve("duplicate directory").await.unwrap();
    assert_eq!(result.command, "cp -r");
    assert_eq!(result.source, Source::Static);
    assert_eq!(result.confidence, 1.0);
}

#[tokio::test]
async fn test_every_catalog_pair_skips_providers() {
    let man = Arc::new(StubMan::default());
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote::default());
    let catalog = Catalog::builtin();
    let resolver = cascade(catalog.clone(), &man, &modules, &remote);

    let nouns = [
        "file", "directory", "process", "package", "text", "disk", "memory", "network", "history",
    ];
    let mut checked = 0;
    for verb in catalog.verbs() {
        for noun in nouns {
            let Some(entry) = catalog.lookup(verb, noun) else {
                continue;
            };
            let input = format!("please {} the {}", verb, noun);
            let result = resolver.resolve(&input).await.unwrap();
            assert_eq!(result.command, entry.command, "input: {}", input);
            assert_eq!(result.source, Source::Static);
            assert_eq!(result.confidence, 1.0);
            checked += 1;
        }
    }

    assert!(checked >= 30, "only {} catalog pairs checked", checked);
    assert_eq!(calls(&man.calls), 0);
    assert_eq!(calls(&modules.calls), 0);
    assert_eq!(calls(&remote.calls), 0);
}

#[tokio::test]
async fn test_man_tier_grep() {
    let man = Arc::new(StubMan {
        hits: vec![man_hit("grep", 65), man_hit("egrep", 20)],
        ..Default::default()
    });
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let result = resolver.resolve("search text").await.unwrap();
    assert_eq!(result.command, "grep");
    assert_eq!(result.source, Source::Man);
    assert_eq!(result.confidence, 0.8);

    assert_eq!(*man.seen.lock().unwrap(), vec!["search", "text"]);
    assert_eq!(calls(&modules.calls), 0);
    assert_eq!(calls(&remote.calls), 0);
}

#[tokio::test]
async fn test_man_score_just_above_threshold_short_circuits() {
    let man = Arc::new(StubMan {
        hits: vec![man_hit("ps", 15)],
        ..Default::default()
    });
    let modules = Arc::new(StubModules {
        hits: vec![module_hit("htop")],
        ..Default::default()
    });
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let result = resolver.resolve("list all running processes").await.unwrap();
    assert_eq!(result.command, "ps");
    assert_eq!(result.source, Source::Man);
    assert_eq!(calls(&modules.calls), 0);
    assert_eq!(calls(&remote.calls), 0);
}

#[tokio::test]
async fn test_low_man_score_falls_through_to_modules() {
    let man = Arc::new(StubMan {
        hits: vec![man_hit("ps", 10)],
        ..Default::default()
    });
    let modules = Arc::new(StubModules {
        hits: vec![module_hit("htop"), module_hit("top")],
        ..Default::default()
    });
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let result = resolver.resolve("list all running processes").await.unwrap();
    assert_eq!(result.command, "htop");
    assert_eq!(result.source, Source::Module);
    assert_eq!(result.confidence, 0.85);
    assert_eq!(calls(&man.calls), 1);
    assert_eq!(calls(&remote.calls), 0);
}

#[tokio::test]
async fn test_running_processes_keywords_reach_man_tier() {
    let man = Arc::new(StubMan::default());
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let result = resolver.resolve("list all running processes").await;
    assert_eq!(result, Err(ResolveError::NoMatch));
    assert_eq!(*man.seen.lock().unwrap(), vec!["ls", "running", "processes"]);
    assert_eq!(calls(&modules.calls), 1);
    assert_eq!(calls(&remote.calls), 1);
}

#[tokio::test]
async fn test_remote_gets_raw_input_and_usage_hint() {
    let man = Arc::new(StubMan::default());
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote {
        hits: vec![remote_hit("rsync", "rsync -av src/ dst/")],
        ..Default::default()
    });
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let input = "Mirror my Photos folder to the backup drive!";
    let result = resolver.resolve(input).await.unwrap();
    assert_eq!(result.command, "rsync");
    assert_eq!(result.source, Source::Remote);
    assert_eq!(result.confidence, 0.7);
    assert!(result.description.ends_with("\nUsage: rsync -av src/ dst/"));

    assert_eq!(remote.seen.lock().unwrap().as_deref(), Some(input));
}

#[tokio::test]
async fn test_provider_errors_skip_tiers() {
    let man = Arc::new(StubMan {
        fail: true,
        ..Default::default()
    });
    let modules = Arc::new(StubModules {
        fail: true,
        ..Default::default()
    });
    let remote = Arc::new(StubRemote {
        hits: vec![remote_hit("tar", "")],
        ..Default::default()
    });
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let result = resolver.resolve("pack these logs").await.unwrap();
    assert_eq!(result.command, "tar");
    assert_eq!(result.description, "Remote suggestion");
    assert_eq!(calls(&man.calls), 1);
    assert_eq!(calls(&modules.calls), 1);
    assert_eq!(calls(&remote.calls), 1);
}

#[tokio::test]
async fn test_all_tiers_failing_is_no_match() {
    let man = Arc::new(StubMan {
        fail: true,
        ..Default::default()
    });
    let modules = Arc::new(StubModules {
        fail: true,
        ..Default::default()
    });
    let remote = Arc::new(StubRemote {
        fail: true,
        ..Default::default()
    });
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    assert_eq!(
        resolver.resolve("pack these logs").await,
        Err(ResolveError::NoMatch)
    );
    // each tier attempted exactly once
    assert_eq!(calls(&man.calls), 1);
    assert_eq!(calls(&modules.calls), 1);
    assert_eq!(calls(&remote.calls), 1);
}

#[tokio::test]
async fn test_stopword_only_input_stops_before_providers() {
    let man = Arc::new(StubMan::default());
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    assert_eq!(
        resolver.resolve("how do I ?").await,
        Err(ResolveError::NoKeywords)
    );
    assert_eq!(resolver.resolve("").await, Err(ResolveError::NoKeywords));
    assert_eq!(calls(&man.calls), 0);
    assert_eq!(calls(&modules.calls), 0);
    assert_eq!(calls(&remote.calls), 0);
}

#[tokio::test]
async fn test_empty_commands_are_not_results() {
    let man = Arc::new(StubMan {
        hits: vec![man_hit("", 80)],
        ..Default::default()
    });
    let modules = Arc::new(StubModules {
        hits: vec![module_hit("  ")],
        ..Default::default()
    });
    let remote = Arc::new(StubRemote::default());
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    assert_eq!(
        resolver.resolve("pack these logs").await,
        Err(ResolveError::NoMatch)
    );
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_tier() {
    let man = Arc::new(StubMan::default());
    let modules = Arc::new(StubModules::default());
    let remote = Arc::new(StubRemote {
        hits: vec![remote_hit("tar", "")],
        delay: Some(Duration::from_secs(30)),
        ..Default::default()
    });
    let resolver = cascade(empty_catalog(), &man, &modules, &remote);

    let cancel = tokio::time::sleep(Duration::from_millis(20));
    let result = resolver.resolve_until("pack these logs", cancel).await;
    assert_eq!(result, Err(ResolveError::Cancelled));
    assert_eq!(calls(&remote.calls), 1);
}

#[tokio::test]
async fn test_uncancelled_resolution_completes() {
    let resolver = Resolver::new(ResolverConfig::default(), Catalog::builtin().clone());
    let result = resolver
        .resolve_until("duplicate directory", std::future::pending())
        .await
        .unwrap();
    assert_eq!(result.command, "cp -r");
}

#[tokio::test]
async fn test_concurrent_requests_share_catalog() {
    let resolver = Arc::new(Resolver::new(
        ResolverConfig::default(),
        Catalog::builtin().clone(),
    ));

    let mut handles = Vec::new();
    for input in ["copy a file", "duplicate directory", "delete folder"] {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move { resolver.resolve(input).await }));
    }

    let mut commands = Vec::new();
    for handle in handles {
        commands.push(handle.await.unwrap().unwrap().command);
    }
    assert_eq!(commands, vec!["cp", "cp -r", "rm -rf"]);
}
