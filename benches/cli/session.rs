use criterion::{Criterion, Throughput, black_box};
use libcli::cli::{Args, Command, Config, FnOutput, Registry, Session, Shell, help};

fn noop(_shell: &mut Shell<'_>, _cmd: &Command, _args: &mut Args<'_>) {}

fn commands() -> Vec<Command> {
    (0..32)
        .map(|i| {
            let name: &'static str = format!("command{}", i).leak();
            Command::new(name, "benchmark command", noop)
        })
        .collect()
}

pub fn bench_process(c: &mut Criterion) {
    let line = b"command31 with a few arguments\r\n";
    let commands = commands();
    let registry: Registry = Registry::new();
    for command in &commands {
        registry.register(command).unwrap();
    }

    let mut session: Session<'_, '_, _, 128> = Session::new(
        &registry,
        FnOutput(|bytes: &[u8]| {
            black_box(bytes);
        }),
        Config::default(),
    );

    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("process_line", |b| {
        b.iter(|| {
            for &byte in line.iter() {
                let _ = session.process(black_box(byte));
            }
        })
    });
    group.finish();
}

pub fn bench_dispatch_help(c: &mut Criterion) {
    let help_command = Command::new("help", "list commands", help);
    let commands = commands();
    let registry: Registry = Registry::new();
    registry.register(&help_command).unwrap();
    for command in &commands {
        registry.register(command).unwrap();
    }

    let mut session: Session<'_, '_, _, 64> = Session::new(
        &registry,
        FnOutput(|bytes: &[u8]| {
            black_box(bytes);
        }),
        Config::default(),
    );

    c.bench_function("session/help", |b| {
        b.iter(|| {
            let _ = session.input(black_box(b"help\r\n"));
        })
    });
}

pub fn bench_registry_find(c: &mut Criterion) {
    let commands = commands();
    let registry: Registry = Registry::new();
    for command in &commands {
        registry.register(command).unwrap();
    }

    c.bench_function("registry/find_last", |b| {
        b.iter(|| black_box(registry.find(black_box("command31"))))
    });
}
