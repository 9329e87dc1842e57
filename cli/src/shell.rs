//! Interactive session: typed lines become controller commands.

use std::fmt;
use std::io::Write as _;

use anyhow::Result;
use forkify_core::{Command, Controller, Outcome, ServingsDirection, ShoppingList};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
Commands:
  search <query>       search recipes
  page <n>             show page n of the last search
  open <id>            show a recipe
  servings +|-         one serving more or less
  add                  add the recipe's ingredients to the shopping list
  list                 show the shopping list
  del <n>              remove item n from the shopping list
  count <n> <amount>   change the amount of item n
  like                 like or unlike the recipe
  likes                show liked recipes
  help                 show this help
  quit                 leave";

/// A parsed line of input.
#[derive(Debug, PartialEq)]
pub enum Action {
    Run(Command),
    ShowList,
    ShowLikes,
    Help,
    Quit,
    Nothing,
}

/// Parse one input line. List positions are resolved against `list`.
pub fn parse_line(line: &str, list: &ShoppingList) -> Result<Action, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let action = match word.to_lowercase().as_str() {
        "" => Action::Nothing,
        "search" | "s" => Action::Run(Command::Search {
            query: rest.to_string(),
        }),
        "page" | "p" => Action::Run(Command::GoToPage(parse_number(rest, "page")?)),
        "open" | "o" => Action::Run(Command::SelectRecipe {
            id: rest.to_string(),
        }),
        "servings" => match rest {
            "+" => Action::Run(Command::UpdateServings(ServingsDirection::Increase)),
            "-" => Action::Run(Command::UpdateServings(ServingsDirection::Decrease)),
            _ => return Err("usage: servings +|-".to_string()),
        },
        "add" => Action::Run(Command::AddRecipeToList),
        "list" | "l" => Action::ShowList,
        "del" => {
            let position = parse_number(rest, "item")?;
            Action::Run(Command::DeleteListItem {
                id: item_id(list, position)?,
            })
        }
        "count" => {
            let (position, amount) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: count <n> <amount>".to_string())?;
            let position = parse_number(position, "item")?;
            let count: f64 = amount
                .trim()
                .parse()
                .ok()
                .filter(|c: &f64| c.is_finite() && *c >= 0.0)
                .ok_or_else(|| format!("invalid amount: {}", amount.trim()))?;
            Action::Run(Command::UpdateListItemCount {
                id: item_id(list, position)?,
                count,
            })
        }
        "like" => Action::Run(Command::ToggleLike),
        "likes" => Action::ShowLikes,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("unknown command: {} (try 'help')", other)),
    };
    Ok(action)
}

fn parse_number(s: &str, what: &str) -> Result<usize, String> {
    s.parse()
        .map_err(|_| format!("expected a {} number, got '{}'", what, s))
}

fn item_id(list: &ShoppingList, position: usize) -> Result<uuid::Uuid, String> {
    position
        .checked_sub(1)
        .and_then(|i| list.items().get(i))
        .map(|item| item.id)
        .ok_or_else(|| format!("no item {} on the shopping list", position))
}

/// Text to print for an outcome, if any.
pub fn describe(outcome: &Outcome, controller: &Controller) -> Result<Option<String>, fmt::Error> {
    let state = controller.state();
    let text = match outcome {
        Outcome::Ignored | Outcome::Stale => None,
        Outcome::Results(page) => Some(render::results(page)?),
        Outcome::Recipe { liked } => state
            .recipe
            .as_ref()
            .map(|r| render::recipe(r, *liked))
            .transpose()?,
        Outcome::List => Some(render::list(&state.list)?),
        Outcome::Likes { liked, num_likes } => Some(format!(
            "{} ({} liked recipe{})",
            if *liked { "Liked." } else { "Unliked." },
            num_likes,
            if *num_likes == 1 { "" } else { "s" }
        )),
        Outcome::Alert(message) => Some(format!("! {}", message)),
    };
    Ok(text)
}

pub async fn run(mut controller: Controller) -> Result<()> {
    println!("forkify: type 'help' for commands");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("forkify> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let action = match parse_line(&line, &controller.state().list) {
            Ok(action) => action,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match action {
            Action::Run(command) => {
                let outcome = controller.dispatch(command).await;
                if let Some(text) = describe(&outcome, &controller)? {
                    println!("{}", text);
                }
            }
            Action::ShowList => println!("{}", render::list(&controller.state().list)?),
            Action::ShowLikes => println!("{}", render::likes(controller.state().likes.likes())?),
            Action::Help => println!("{}", HELP),
            Action::Quit => break,
            Action::Nothing => {}
        }
    }

    Ok(())
}
