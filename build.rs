use vergen::{BuildBuilder, Emitter};
use vergen_git2::Git2Builder;

// `askbox --version` reports the commit it was built from.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;

    // crates.io and tarball builds have no git metadata
    match Git2Builder::default().sha(true).dirty(true).build() {
        Ok(git2) => {
            Emitter::default()
                .add_instructions(&build)?
                .add_instructions(&git2)?
                .emit()?;
        }
        Err(_) => {
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
            println!("cargo:rustc-env=VERGEN_GIT_DIRTY=false");
            Emitter::default().add_instructions(&build)?.emit()?;
        }
    }

    Ok(())
}
