use skatclient::dispatch::Dispatcher;
use skatclient::game::*;
use skatclient::session::*;
use std::sync::Arc;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        dispatching_catch_all,
        dispatching_client_list,
        dispatching_table_play,
        dispatching_table_state,
}

fn dispatcher() -> Dispatcher {
    let template = Snapshot {
        phase: Phase::Cardplay,
        cards: [10, 10, 10],
        trick_num: 1,
        ..Snapshot::default()
    };
    Dispatcher::new(Arc::new(Stub::new(template, &["CJ", "SJ", "HJ", "DJ"])))
}

fn seated() -> (Dispatcher, Session) {
    let dispatcher = dispatcher();
    let mut session = Session::new("bob", "");
    dispatcher.dispatch(&mut session, "create T1 bob 3").unwrap();
    dispatcher
        .dispatch(&mut session, "table T1 bob start 1 bob 60 ann 60 cid 60")
        .unwrap();
    (dispatcher, session)
}

fn dispatching_catch_all(c: &mut criterion::Criterion) {
    let dispatcher = dispatcher();
    let mut session = Session::new("bob", "");
    c.bench_function("dispatch an unknown line through every matcher", |b| {
        b.iter(|| dispatcher.dispatch(&mut session, "nonsense that nobody understands"))
    });
}

fn dispatching_client_list(c: &mut criterion::Criterion) {
    let dispatcher = dispatcher();
    let mut session = Session::new("bob", "");
    c.bench_function("dispatch a clients + line", |b| {
        b.iter(|| dispatcher.dispatch(&mut session, "clients + ann 0 de 12 1500 0 60 1 0"))
    });
}

fn dispatching_table_play(c: &mut criterion::Criterion) {
    let (dispatcher, mut session) = seated();
    c.bench_function("dispatch a foreign table play", |b| {
        b.iter(|| dispatcher.dispatch(&mut session, "table T1 bob play 1 SC 60 60 60"))
    });
}

fn dispatching_table_state(c: &mut criterion::Criterion) {
    let (dispatcher, mut session) = seated();
    let row = |n: &str| format!("{} A 3 1 18 40 0 0 1 1", n);
    let line = format!(
        "table T1 bob state 3 bob ann cid . {} {} {} {} true 1",
        row("bob"),
        row("ann"),
        row("cid"),
        row(".")
    );
    c.bench_function("dispatch a table state", |b| {
        b.iter(|| dispatcher.dispatch(&mut session, &line))
    });
}
