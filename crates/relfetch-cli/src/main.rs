use relfetch_lib::cli::{parse_args, resolve_command, run_fetch};
use relfetch_lib::error::RelFetchError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), RelFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_command(args.command)?;

    // A failed fetch has already printed manual instructions; it is not an error exit.
    run_fetch(params).await;

    Ok(())
}
