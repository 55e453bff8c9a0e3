use clap::{Parser, Subcommand};
use hetero_container::{
    closed_set, types, AnyContainer, ClosedSetContainer, CountVisitor, Dispatch, DoubleVisitor,
    HeteroContainer, PrintVisitor,
};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

closed_set! {
    #[derive(Debug, Clone)]
    enum Scalar {
        Int(i32),
        Float(f64),
        Text(String),
    }
}

#[derive(Parser)]
#[command(name = "hetero", about = "Heterogeneous container demonstrations")]
struct Cli {
    /// Log container internals (bucket creation, copies, clears)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print, double and print again with each container
    Showcase,
    /// Copy and clear a container that holds copies of itself
    Copy,
    /// Time bulk insertion followed by a doubling visit
    Bench {
        /// Number of values inserted per element type
        #[arg(short, long, default_value_t = 100_000)]
        count: usize,

        /// Also run the boxed-value container (slow for large counts)
        #[arg(long)]
        boxed: bool,
    },
}

fn section(title: &str) {
    println!("//------------------------------------------------");
    println!("// {}", title);
    println!();
}

fn showcase() {
    section("Single Variant");
    let mut single = Scalar::from(1i32);
    single.dispatch(&mut PrintVisitor);
    single.dispatch(&mut DoubleVisitor);
    single.dispatch(&mut PrintVisitor);

    single = Scalar::from("foo".to_string());
    single.dispatch(&mut PrintVisitor);
    single.dispatch(&mut DoubleVisitor);
    single.dispatch(&mut PrintVisitor);
    println!();

    section("Variant Vector");
    let mut closed = ClosedSetContainer::<Scalar>::new();
    closed.insert(1i32);
    closed.insert(2.2f64);
    closed.insert("foo".to_string());
    closed.visit(&mut PrintVisitor);
    println!();
    closed.visit(&mut DoubleVisitor);
    closed.visit(&mut PrintVisitor);
    println!();

    section("THE Heterogeneous Container");
    let mut open = HeteroContainer::new();
    open.insert(1i32);
    open.insert(2.5f32);
    open.insert('c');
    open.insert("foo".to_string());
    open.visit_declared(&mut PrintVisitor);
    println!();
    open.visit_declared(&mut DoubleVisitor);
    open.visit_declared(&mut PrintVisitor);
    println!();

    section("Boxed Values");
    let mut boxed = AnyContainer::new();
    boxed.push(1i32);
    boxed.push(2.5f32);
    boxed.push('c');
    boxed.push("foo".to_string());
    boxed.visit_declared(&mut PrintVisitor);
    println!();
    boxed.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
    boxed.visit_declared(&mut PrintVisitor);
}

fn copy_demo() {
    section("Copy and Clear");
    let mut original = HeteroContainer::new();
    original.insert(1i32);
    original.insert('c');
    let snapshot = original.clone();
    original.insert(snapshot);

    let mut copy = original.clone();
    copy.visit(types::<(i32,)>(), &mut DoubleVisitor);

    println!("original {}:", original.id());
    original.visit(types::<(i32, char)>(), &mut PrintVisitor);
    println!("copy {}:", copy.id());
    copy.visit(types::<(i32, char)>(), &mut PrintVisitor);

    copy.clear();
    println!(
        "after clearing the copy: original holds {} values, copy holds {}",
        original.len(),
        copy.len()
    );

    copy.insert(42i32);
    println!("copy reused after clear, types: {:?}", copy.type_names());
}

fn time<F: FnOnce() -> usize>(label: &str, f: F) {
    let start = Instant::now();
    let visited = f();
    println!("{:<12} {:>10} values doubled in {:?}", label, visited, start.elapsed());
}

fn bench(count: usize, boxed: bool) {
    section("Benchmark");
    info!(count, boxed, "running benchmark");

    time("closed-set", || {
        let mut container = ClosedSetContainer::<Scalar>::new();
        for i in 0..count {
            container.insert(i as i32);
            container.insert(i as f64);
            container.insert(i.to_string());
        }
        container.visit(&mut DoubleVisitor);
        container.len()
    });

    time("open-set", || {
        let mut container = HeteroContainer::new();
        for i in 0..count {
            container.insert(i as i32);
            container.insert(i as f32);
            container.insert(char::from(b'a' + (i % 26) as u8));
        }
        let mut counter = CountVisitor::default();
        container.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
        container.visit(types::<(i32, f32)>(), &mut counter);
        counter.count
    });

    if boxed {
        time("boxed", || {
            let mut container = AnyContainer::new();
            for i in 0..count {
                container.push(i as i32);
                container.push(i as f32);
                container.push(char::from(b'a' + (i % 26) as u8));
            }
            let mut counter = CountVisitor::default();
            container.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
            container.visit(types::<(i32, f32)>(), &mut counter);
            counter.count
        });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Showcase => showcase(),
        Command::Copy => copy_demo(),
        Command::Bench { count, boxed } => bench(count, boxed),
    }

    Ok(())
}
