use petmatch_app::application::{FeedSettings, PetsViewModel};
use petmatch_app::domain::PetCard;
use petmatch_app::infrastructure::SamplePets;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let repo = Arc::new(SamplePets::new());
    let settings = FeedSettings::from_env();
    tracing::info!(
        "starting pet feed (like delay {:?}, top liked limit {})",
        settings.like_delay,
        settings.top_liked_limit
    );

    let vm = PetsViewModel::with_settings(repo.clone(), settings);

    let mut pets_rx = vm.pets();
    let mut top_rx = vm.top_liked();
    let mut loading_rx = vm.loading();
    let mut error_rx = vm.error();

    println!("petmatch feed. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                // EOF or a broken stdin ends the session.
                let Ok(Some(line)) = line else { break };
                if !handle_command(line.trim(), &vm, &repo) {
                    break;
                }
            }
            _ = pets_rx.changed() => print_cards("pets", &pets_rx.borrow_and_update()),
            _ = top_rx.changed() => print_cards("top liked", &top_rx.borrow_and_update()),
            _ = loading_rx.changed() => println!("~ loading: {}", *loading_rx.borrow_and_update()),
            _ = error_rx.changed() => println!("~ error: {}", *error_rx.borrow_and_update()),
        }
    }

    vm.shutdown();
    println!("bye");
}

fn handle_command(input: &str, vm: &PetsViewModel, repo: &Arc<SamplePets>) -> bool {
    let mut parts = input.split_whitespace();
    match parts.next() {
        None => true,
        Some("quit") | Some("q") => false,
        Some("help") => {
            print_help();
            true
        }
        Some("list") => {
            print_cards("pets", &vm.pets().borrow());
            true
        }
        Some("top") => {
            print_cards("top liked", &vm.top_liked().borrow());
            true
        }
        Some("refresh") => {
            vm.refresh();
            true
        }
        Some("fail") => {
            repo.fail_next();
            println!("~ next fetch will fail");
            true
        }
        Some("like") => {
            if let Some(card) = card_at(vm, parts.next()) {
                vm.select_pet(&card.pet);
            }
            true
        }
        Some("cancel") => {
            if let Some(card) = card_at(vm, parts.next()) {
                vm.cancel_like(&card.pet);
            }
            true
        }
        Some(other) => {
            println!("~ unknown command {:?}, try `help`", other);
            true
        }
    }
}

fn card_at(vm: &PetsViewModel, arg: Option<&str>) -> Option<PetCard> {
    let Some(arg) = arg else {
        println!("~ usage: like <n> / cancel <n>");
        return None;
    };
    let Ok(n) = arg.parse::<usize>() else {
        println!("~ not a number: {}", arg);
        return None;
    };
    let card = vm.pets().borrow().get(n.wrapping_sub(1)).cloned();
    if card.is_none() {
        println!("~ no pet at {}", n);
    }
    card
}

fn print_cards(label: &str, cards: &[PetCard]) {
    if cards.is_empty() {
        println!("~ {}: (empty)", label);
        return;
    }
    println!("~ {}:", label);
    for (i, card) in cards.iter().enumerate() {
        println!(
            "  {:>2}. [{}] {:<18} match {:>3}%{}",
            i + 1,
            if card.pet.liked { "x" } else { " " },
            card.pet.user_name,
            card.pet.match_percentage,
            if card.is_loading { "  (confirming...)" } else { "" }
        );
    }
}

fn print_help() {
    println!("~ commands:");
    println!("    list        show the current cards");
    println!("    top         show the top liked cards");
    println!("    like <n>    like pet n (confirms after the delay, unlikes instantly)");
    println!("    cancel <n>  cancel a pending like for pet n");
    println!("    refresh     fetch the feed again");
    println!("    fail        make the next fetch fail");
    println!("    quit        leave");
}
