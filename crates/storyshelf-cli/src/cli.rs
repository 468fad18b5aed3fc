use storyshelf::listing::SortMode;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    List,
    Archive,
    Show,
    Like,
    Comments,
    DeleteComment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help(HelpTopic),
    List(ListArgs),
    Archive(ArchiveArgs),
    Show(ShowArgs),
    Like(LikeArgs),
    Comments(AdminArgs),
    DeleteComment(DeleteCommentArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListArgs {
    pub search: Option<String>,
    pub sort: SortMode,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveArgs {
    pub descending: bool,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowArgs {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LikeArgs {
    pub slug: String,
    /// Reader identity; a fresh one is generated when absent.
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminArgs {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCommentArgs {
    pub id: Uuid,
    pub password: String,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "list" => parse_list(it.map(|s| s.as_str())),
        "archive" => parse_archive(it.map(|s| s.as_str())),
        "show" => parse_show(it.map(|s| s.as_str())),
        "like" => parse_like(it.map(|s| s.as_str())),
        "comments" => parse_comments(it.map(|s| s.as_str())),
        "delete-comment" => parse_delete_comment(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_list<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut search: Option<String> = None;
    let mut sort = SortMode::Likes;
    let mut page = 1;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::List)),
            "--search" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--search requires a value");
                };
                search = Some(v.to_string());
            }
            _ if token.starts_with("--search=") => {
                search = Some(token.trim_start_matches("--search=").to_string());
            }
            "--sort" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--sort requires a value");
                };
                sort = parse_sort(v)?;
            }
            _ if token.starts_with("--sort=") => {
                sort = parse_sort(token.trim_start_matches("--sort="))?;
            }
            "--page" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--page requires a value");
                };
                page = parse_page(v)?;
            }
            _ if token.starts_with("--page=") => {
                page = parse_page(token.trim_start_matches("--page="))?;
            }
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    Ok(Command::List(ListArgs { search, sort, page }))
}

fn parse_archive<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut descending = false;
    let mut page = 1;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Archive)),
            "--desc" => descending = true,
            "--page" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--page requires a value");
                };
                page = parse_page(v)?;
            }
            _ if token.starts_with("--page=") => {
                page = parse_page(token.trim_start_matches("--page="))?;
            }
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    Ok(Command::Archive(ArchiveArgs { descending, page }))
}

fn parse_show<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut slug: Option<String> = None;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Show)),
            _ if token.starts_with('-') => anyhow::bail!("unknown option: {token}"),
            _ if slug.is_none() => slug = Some(token.to_string()),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(slug) = slug else {
        anyhow::bail!("show requires a story slug");
    };
    Ok(Command::Show(ShowArgs { slug }))
}

fn parse_like<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut slug: Option<String> = None;
    let mut user: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Like)),
            "--as" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--as requires a value");
                };
                user = Some(v.to_string());
            }
            _ if token.starts_with("--as=") => {
                user = Some(token.trim_start_matches("--as=").to_string());
            }
            _ if token.starts_with('-') => anyhow::bail!("unknown option: {token}"),
            _ if slug.is_none() => slug = Some(token.to_string()),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(slug) = slug else {
        anyhow::bail!("like requires a story slug");
    };
    Ok(Command::Like(LikeArgs { slug, user }))
}

fn parse_comments<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut password: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Comments)),
            "--password" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--password requires a value");
                };
                password = Some(v.to_string());
            }
            _ if token.starts_with("--password=") => {
                password = Some(token.trim_start_matches("--password=").to_string());
            }
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(password) = password else {
        anyhow::bail!("comments requires --password");
    };
    Ok(Command::Comments(AdminArgs { password }))
}

fn parse_delete_comment<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut id: Option<Uuid> = None;
    let mut password: Option<String> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::DeleteComment)),
            "--password" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--password requires a value");
                };
                password = Some(v.to_string());
            }
            _ if token.starts_with("--password=") => {
                password = Some(token.trim_start_matches("--password=").to_string());
            }
            _ if token.starts_with('-') => anyhow::bail!("unknown option: {token}"),
            _ if id.is_none() => match Uuid::parse_str(token) {
                Ok(v) => id = Some(v),
                Err(_) => anyhow::bail!("invalid comment id: {token}"),
            },
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(id) = id else {
        anyhow::bail!("delete-comment requires a comment id");
    };
    let Some(password) = password else {
        anyhow::bail!("delete-comment requires --password");
    };
    Ok(Command::DeleteComment(DeleteCommentArgs { id, password }))
}

fn parse_sort(value: &str) -> anyhow::Result<SortMode> {
    match value {
        "likes" => Ok(SortMode::Likes),
        "date" => Ok(SortMode::Date),
        other => anyhow::bail!("invalid --sort value: {other} (expected likes or date)"),
    }
}

fn parse_page(value: &str) -> anyhow::Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => anyhow::bail!("invalid --page value: {value}"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
storyshelf - read a storyshelf site from the terminal

USAGE:
  storyshelf <COMMAND> [OPTIONS]

COMMANDS:
  list          Published stories, sorted and paged
  archive       Published stories grouped by year
  show          One story with its comments
  like          Like or unlike a story
  comments      All comments, newest first (admin)
  delete-comment
                Remove a comment (admin)

ENVIRONMENT:
  STORYSHELF_URL            Base URL of the database host
  STORYSHELF_API_KEY        Public API key
  STORYSHELF_TIMEOUT_SECS   Per-request timeout (optional)
  STORYSHELF_ADMIN_SECRET   Password for admin commands; unset or empty
                            disables them

Run `storyshelf <command> --help` for more."
            );
        }
        HelpTopic::List => {
            println!(
                "\
USAGE:
  storyshelf list [OPTIONS]

OPTIONS:
  --search <TEXT>       Match title, description or content (case-insensitive)
  --sort <likes|date>   Sort order (default: likes)
  --page <N>            Page number, 9 stories per page (default: 1)
  -h, --help            Print help"
            );
        }
        HelpTopic::Archive => {
            println!(
                "\
USAGE:
  storyshelf archive [OPTIONS]

OPTIONS:
  --desc                Newest years first
  --page <N>            Page number, 20 stories per page (default: 1)
  -h, --help            Print help"
            );
        }
        HelpTopic::Show => {
            println!(
                "\
USAGE:
  storyshelf show <SLUG>

Prints the story and its comments, and counts one view.

OPTIONS:
  -h, --help            Print help"
            );
        }
        HelpTopic::Like => {
            println!(
                "\
USAGE:
  storyshelf like <SLUG> [OPTIONS]

Toggles the like of a reader on a story.

OPTIONS:
  --as <ID>             Reader identity (default: a new anonymous id, printed)
  -h, --help            Print help"
            );
        }
        HelpTopic::Comments => {
            println!(
                "\
USAGE:
  storyshelf comments --password <PASSWORD>

Lists every comment. Requires STORYSHELF_ADMIN_SECRET.

OPTIONS:
  --password <PASSWORD> Admin password
  -h, --help            Print help"
            );
        }
        HelpTopic::DeleteComment => {
            println!(
                "\
USAGE:
  storyshelf delete-comment <ID> --password <PASSWORD>

Requires STORYSHELF_ADMIN_SECRET.

OPTIONS:
  --password <PASSWORD> Admin password
  -h, --help            Print help"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("storyshelf")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_args_prints_root_help() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Help(HelpTopic::Root));
    }

    #[test]
    fn parse_list_defaults() {
        let cmd = parse_args(&args(&["list"])).unwrap();
        assert_eq!(
            cmd,
            Command::List(ListArgs {
                search: None,
                sort: SortMode::Likes,
                page: 1,
            })
        );
    }

    #[test]
    fn parse_list_with_options() {
        let cmd = parse_args(&args(&["list", "--search", "зима", "--sort=date", "--page", "3"]))
            .unwrap();
        let Command::List(list) = cmd else {
            panic!("expected list");
        };
        assert_eq!(list.search.as_deref(), Some("зима"));
        assert_eq!(list.sort, SortMode::Date);
        assert_eq!(list.page, 3);
    }

    #[test]
    fn parse_list_rejects_bad_values() {
        assert!(parse_args(&args(&["list", "--sort", "views"])).is_err());
        assert!(parse_args(&args(&["list", "--page", "0"])).is_err());
        assert!(parse_args(&args(&["list", "--page"])).is_err());
    }

    #[test]
    fn parse_archive_desc() {
        let cmd = parse_args(&args(&["archive", "--desc", "--page=2"])).unwrap();
        assert_eq!(
            cmd,
            Command::Archive(ArchiveArgs {
                descending: true,
                page: 2,
            })
        );
    }

    #[test]
    fn parse_show_requires_slug() {
        assert!(parse_args(&args(&["show"])).is_err());
        let cmd = parse_args(&args(&["show", "zima"])).unwrap();
        assert_eq!(
            cmd,
            Command::Show(ShowArgs {
                slug: "zima".to_string()
            })
        );
    }

    #[test]
    fn subcommand_help() {
        assert_eq!(
            parse_args(&args(&["archive", "-h"])).unwrap(),
            Command::Help(HelpTopic::Archive)
        );
    }

    #[test]
    fn parse_like_with_identity() {
        let cmd = parse_args(&args(&["like", "zima", "--as", "user_1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Like(LikeArgs {
                slug: "zima".to_string(),
                user: Some("user_1".to_string()),
            })
        );
        let Command::Like(like) = parse_args(&args(&["like", "zima"])).unwrap() else {
            panic!("expected like");
        };
        assert!(like.user.is_none());
    }

    #[test]
    fn admin_commands_need_password() {
        assert!(parse_args(&args(&["comments"])).is_err());
        assert_eq!(
            parse_args(&args(&["comments", "--password=1814"])).unwrap(),
            Command::Comments(AdminArgs {
                password: "1814".to_string()
            })
        );
    }

    #[test]
    fn parse_delete_comment_args() {
        let id = "6f1c1d0e-2b8a-4d43-9a4e-3c1f5e1b2a10";
        let Command::DeleteComment(del) =
            parse_args(&args(&["delete-comment", id, "--password", "p"])).unwrap()
        else {
            panic!("expected delete-comment");
        };
        assert_eq!(del.id.to_string(), id);
        assert_eq!(del.password, "p");

        assert!(parse_args(&args(&["delete-comment", "nope", "--password", "p"])).is_err());
        assert!(parse_args(&args(&["delete-comment", id])).is_err());
    }

    #[test]
    fn unknown_command_errors() {
        let err = parse_args(&args(&["publish"])).unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }
}
