use clap::Parser;
use cluster_defaults::args::Args;
use cluster_defaults::azure::AzureCloud;
use cluster_defaults::config::Config;
use cluster_defaults::output::print_cluster_summary;
use cluster_defaults::processing::SplitAllocator;
use cluster_defaults::vfs::DefaultVfs;
use cluster_defaults::{perform_assignments, read_cluster_spec, AssignContext, BoxError};

fn main() -> Result<(), BoxError> {
    let args = Args::parse();

    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = Config::from_env();
    let cloud = AzureCloud::new();
    let vfs = DefaultVfs::new(config.http_timeout)?;
    let ctx = AssignContext {
        cloud: &cloud,
        vfs: &vfs,
        allocator: &SplitAllocator,
        config: &config,
    };

    let mut cluster = read_cluster_spec(&args.spec)?;
    perform_assignments(&mut cluster, &ctx)?;

    print_cluster_summary(&cluster);
    println!("{}", serde_json::to_string_pretty(&cluster)?);
    Ok(())
}
