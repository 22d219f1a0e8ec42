use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use termfolio_core::builtins::default_registry;
use termfolio_core::{Autocomplete, Dispatcher, Profile, Session, tokenize};

fn registry() -> Arc<termfolio_core::CommandRegistry> {
    let profile = Profile::bundled().expect("bundled profile parses");
    Arc::new(default_registry(profile))
}

fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(registry());

    c.bench_function("tokenize_line", |b| {
        b.iter(|| tokenize(black_box("  projects   cost   radar  ")))
    });

    c.bench_function("dispatch_echo", |b| {
        b.iter(|| dispatcher.execute(black_box("echo hello from the benchmark")))
    });

    c.bench_function("dispatch_projects", |b| {
        b.iter(|| dispatcher.execute(black_box("projects")))
    });

    c.bench_function("dispatch_not_found", |b| {
        b.iter(|| dispatcher.execute(black_box("projcts")))
    });
}

fn bench_autocomplete(c: &mut Criterion) {
    let autocomplete = Autocomplete::new(registry());

    c.bench_function("suggest_single_char", |b| {
        b.iter(|| autocomplete.suggest(black_box("e")))
    });

    c.bench_function("suggest_no_match", |b| {
        b.iter(|| autocomplete.suggest(black_box("zzz")))
    });
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("session_submit_and_recall", |b| {
        b.iter(|| {
            let mut session = Session::new(registry());
            for i in 0..20 {
                session.submit_line(&format!("echo {}", i));
            }
            for _ in 0..25 {
                black_box(session.recall_up());
            }
        })
    });
}

criterion_group!(benches, bench_dispatch, bench_autocomplete, bench_session);
criterion_main!(benches);
