//! Subcommand bodies. Each returns `AuraError` and prints its own output.

use aura::prelude::*;
use aura::protocol::{GenerateRequest, is_known_club};
use aura::transport::Backend;

use crate::Login;

/// Text for a failed command: the user-facing message where one exists.
pub fn describe(err: &AuraError) -> String {
    match err {
        AuraError::Session(e) => e.user_message(),
        AuraError::Predictor(e) => e.user_message(),
        other => other.to_string(),
    }
}

async fn sign_in<B: Backend>(app: &AuraApp<B>, login: &Login) -> Result<UserProfile, AuraError> {
    tracing::debug!(email = %login.email, "signing in");
    Ok(app.auth().login(&login.email, &login.password).await?)
}

fn print_user(user: &UserProfile) {
    println!("{} ({})", user.email, user.id);
    println!("  club:   {}", user.favorite_club);
    if user.banter_mode {
        println!("  banter: on (switch to Arsenal to unlock the app)");
    }
}

fn print_decision(path: &str, decision: &RouteDecision) {
    match decision {
        RouteDecision::RenderLoading => println!("{path} -> loading"),
        RouteDecision::Render(page) => println!("{path} -> render {page}"),
        RouteDecision::Redirect(to) => println!("{path} -> redirect {to}"),
    }
}

pub async fn status<B: Backend>(app: &AuraApp<B>) -> Result<(), AuraError> {
    match app.start().await {
        Session::SignedIn { user, .. } => print_user(&user),
        Session::SignedOut => println!("signed out"),
        Session::Loading => println!("still loading"),
    }
    Ok(())
}

pub async fn login<B: Backend>(app: &AuraApp<B>, login: &Login) -> Result<UserProfile, AuraError> {
    let user = sign_in(app, login).await?;
    print_user(&user);
    Ok(user)
}

pub async fn register<B: Backend>(
    app: &AuraApp<B>,
    login: &Login,
    club: &str,
) -> Result<(), AuraError> {
    check_club(club)?;
    let user = app
        .auth()
        .register(&login.email, &login.password, club)
        .await?;
    println!("registered {} ({}); log in to continue", user.email, user.favorite_club);
    Ok(())
}

/// Rejects a club the server would not accept, before any request.
fn check_club(club: &str) -> Result<(), AuraError> {
    if is_known_club(club) {
        Ok(())
    } else {
        Err(AuraError::Session(SessionError::Validation(format!(
            "Unknown club {club:?}. Run `aura clubs` for the list."
        ))))
    }
}

pub fn clubs() {
    for club in CLUBS {
        println!("{club}");
    }
}

pub async fn route<B: Backend>(
    app: &AuraApp<B>,
    path: &str,
    login: Option<&Login>,
) -> Result<(), AuraError> {
    match login {
        Some(login) => {
            sign_in(app, login).await?;
        }
        None => {
            app.start().await;
        }
    }
    print_decision(path, &app.navigate(path));
    Ok(())
}

pub async fn change_club<B: Backend>(
    app: &AuraApp<B>,
    login: &Login,
    club: &str,
) -> Result<(), AuraError> {
    check_club(club)?;
    sign_in(app, login).await?;
    let user = app.auth().update_favorite_club(club).await?;
    print_user(&user);
    Ok(())
}

fn print_state(state: &PredictorState) {
    match (state.fixture(), state.error()) {
        (Some(fixture), _) => {
            let venue = if fixture.arsenal_is_home { "home" } else { "away" };
            println!(
                "next: Arsenal vs {} ({venue}), {}",
                fixture.opponent,
                fixture.kickoff.format("%a %d %b %H:%M UTC")
            );
        }
        (None, Some(reason)) => println!("next: {reason}"),
        (None, None) => println!("next: not loaded"),
    }
    match &state.prediction {
        Some(p) => println!("your prediction: {} (#{})", p.scoreline(), p.id),
        None => println!("your prediction: none, suggested {}", state.draft),
    }
}

pub async fn fixture<B: Backend>(app: &AuraApp<B>, login: &Login) -> Result<(), AuraError> {
    sign_in(app, login).await?;
    let mut predictor = app.predictor();
    print_state(predictor.load_context().await?);
    Ok(())
}

pub async fn predict<B: Backend>(
    app: &AuraApp<B>,
    login: &Login,
    home: &str,
    away: &str,
) -> Result<(), AuraError> {
    sign_in(app, login).await?;
    let mut predictor = app.predictor();
    predictor.load_context().await?;
    let state = predictor.save_prediction_text(home, away).await?;
    println!("saved");
    print_state(state);
    Ok(())
}

pub async fn check<B: Backend>(app: &AuraApp<B>, login: &Login) -> Result<(), AuraError> {
    sign_in(app, login).await?;
    let mut predictor = app.predictor();
    predictor.load_context().await?;
    match predictor.check_result().await? {
        CheckOutcome::Pending { message } => println!("{message}"),
        CheckOutcome::Settled(result) => {
            let severity = match result.severity {
                Severity::Exact => "exact",
                Severity::Close => "close",
                Severity::Miss => "miss",
            };
            println!("{} ({severity}, {} pts)", result.message, result.points);
        }
    }
    Ok(())
}

pub async fn generate<B: Backend>(
    app: &AuraApp<B>,
    login: &Login,
    mode: String,
    intensity: Intensity,
    player: Option<String>,
) -> Result<(), AuraError> {
    sign_in(app, login).await?;
    let text = app
        .generate(&GenerateRequest {
            mode,
            intensity,
            player,
        })
        .await?;
    println!("{text}");
    Ok(())
}

pub async fn archive<B: Backend>(app: &AuraApp<B>, login: &Login) -> Result<(), AuraError> {
    sign_in(app, login).await?;
    println!("Honors");
    for honor in app.honors().await? {
        println!("  {:>4}  {} ({})", honor.count, honor.title, honor.subtitle);
    }
    println!("Timeline");
    for item in app.timeline().await? {
        println!("  {}  {}: {}", item.period, item.title, item.description);
    }
    println!("Links");
    for link in app.info_links().await? {
        println!("  {}  {}", link.title, link.url);
    }
    Ok(())
}

pub async fn chat<B: Backend>(
    app: &AuraApp<B>,
    login: &Login,
    message: &str,
) -> Result<(), AuraError> {
    sign_in(app, login).await?;
    println!("{}", app.chat(message).await?);
    Ok(())
}
