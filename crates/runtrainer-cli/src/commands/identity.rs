use clap::Subcommand;
use runtrainer_core::identity::{get_or_create_identity_at, sign_out_at};
use runtrainer_core::storage::data_dir;

#[derive(Subcommand)]
pub enum IdentityAction {
    /// Print the anonymous identity, creating it if needed
    Show,
    /// Forget the identity; the next session starts a new one
    SignOut,
}

pub fn run(action: IdentityAction) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    match action {
        IdentityAction::Show => {
            println!("{}", get_or_create_identity_at(&dir)?);
        }
        IdentityAction::SignOut => {
            if sign_out_at(&dir)? {
                println!("signed out");
            } else {
                println!("no identity stored");
            }
        }
    }
    Ok(())
}
