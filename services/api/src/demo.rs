use clap::Args;
use kidcheck::accounts::{AccountDirectory, AccountKind, Registration};
use kidcheck::error::AppError;
use kidcheck::requests::{
    NewCheckinRequest, RequestKind, RequestLedger, RequestStats, RequestStatus, StatusUpdate,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Email used for the demo parent account
    #[arg(long, default_value = "jo@x.com")]
    pub(crate) parent_email: String,
    /// Child named on the demo check-in request
    #[arg(long, default_value = "Ann")]
    pub(crate) child_name: String,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    walk_through(&AccountDirectory::new(), &RequestLedger::new(), args)
}

fn walk_through(
    directory: &AccountDirectory,
    ledger: &RequestLedger,
    args: DemoArgs,
) -> Result<(), AppError> {
    let DemoArgs {
        parent_email,
        child_name,
    } = args;

    println!("KidCheck demo");
    println!("\nAccounts");
    let registration = Registration {
        name: "Jo".to_string(),
        email: parent_email.clone(),
        password: "p1".to_string(),
        child_name: child_name.clone(),
        kind: AccountKind::Parent,
    };

    let account = directory.register(registration.clone())?;
    let profile = account.profile();
    println!(
        "- Registered {} <{}> as {} (id {})",
        profile.name,
        profile.email,
        profile.user_type.as_str(),
        profile.id.0
    );

    match directory.register(registration) {
        Ok(_) => println!("- Second registration unexpectedly succeeded"),
        Err(err) => println!("- Second registration with the same email: {err}"),
    }

    for (label, password) in [("correct", "p1"), ("wrong", "not-p1")] {
        match directory.login(&parent_email, password, &AccountKind::Parent) {
            Ok(Some(found)) => println!("- Login with {label} password: ok (id {})", found.id.0),
            Ok(None) => println!("- Login with {label} password: Invalid credentials"),
            Err(err) => println!("- Login with {label} password failed: {err}"),
        }
    }

    println!("\nRequests");
    let request = ledger.create(NewCheckinRequest {
        kind: RequestKind::Checkin,
        child_name: child_name.clone(),
        child_grade: "1".to_string(),
        parent_email: parent_email.clone(),
        parent_name: profile.name.clone(),
        message: "Dropping off after the dentist".to_string(),
    })?;
    println!(
        "- Created {} request for {} -> status {}",
        request.kind.as_str(),
        request.child_name,
        request.status.as_str()
    );
    print_stats(ledger);

    match ledger.update(
        &request.id,
        StatusUpdate {
            status: RequestStatus::Approved,
            feedback: Some("ok".to_string()),
        },
    ) {
        Ok(updated) => println!(
            "- Staff set status {} at {}",
            updated.status.as_str(),
            updated.response_time.unwrap_or_default()
        ),
        Err(err) => println!("- Update failed: {err}"),
    }
    print_stats(ledger);

    for attempt in ["First", "Second"] {
        match ledger.delete(&request.id) {
            Ok(removed) => println!("- {attempt} delete removed a request: {removed}"),
            Err(err) => println!("- {attempt} delete failed: {err}"),
        }
    }
    print_stats(ledger);

    Ok(())
}

fn print_stats(ledger: &RequestLedger) {
    match ledger.stats() {
        Ok(RequestStats {
            pending,
            processed,
            total,
        }) => println!("  stats: pending={pending} processed={processed} total={total}"),
        Err(err) => println!("  stats unavailable: {err}"),
    }
}
