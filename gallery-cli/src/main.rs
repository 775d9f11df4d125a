use chrono::{DateTime, Utc};
use clap::Parser;
use gallery_client::{GalleryClient, GalleryClientHttp};

#[derive(Parser, Debug)]
#[clap(about = "Manage a gallery server from the command line")]
struct Cli {
    #[clap(short, long, env = "GALLERY_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Log in as the administrator and store the token locally.
    Login {
        #[clap(long, env = "GALLERY_PASSWORD")]
        password: String,
    },
    GetPost {
        id: String,
    },
    ListPosts {
        #[clap(long)]
        limit: Option<u32>,
        #[clap(long)]
        offset: Option<u32>,
    },
    CreatePost {
        id: String,
        #[clap(long)]
        image_id: String,
        /// RFC 3339 timestamp; the server uses the current time when omitted.
        #[clap(long)]
        created_at: Option<DateTime<Utc>>,
    },
    DeletePost {
        id: String,
    },
    GetImage {
        id: String,
    },
    LatestImage,
    RandomImage,
    Neighbors {
        id: String,
    },
    ListImages {
        #[clap(long)]
        limit: Option<u32>,
        #[clap(long)]
        offset: Option<u32>,
    },
    AddImage {
        id: String,
        #[clap(long)]
        caption: Option<String>,
        #[clap(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut client = GalleryClientHttp::connect(&args.server)?;

    match args.command {
        Command::Login { password } => {
            client.login(password).await?;
            println!("Successfully logged in!");
        }
        Command::GetPost { id } => {
            println!("{}", client.get_post(&id).await?);
        }
        Command::ListPosts { limit, offset } => {
            let posts = client.list_posts(limit, offset).await?;
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("- {}", post);
            }
        }
        Command::CreatePost {
            id,
            image_id,
            created_at,
        } => {
            let post = client.create_post(id, image_id, created_at).await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::DeletePost { id } => {
            client.delete_post(&id).await?;
            println!("Post deleted!");
        }
        Command::GetImage { id } => {
            println!("{}", client.get_image(&id).await?);
        }
        Command::LatestImage => {
            println!("{}", client.latest_image().await?);
        }
        Command::RandomImage => {
            println!("{}", client.random_image().await?);
        }
        Command::Neighbors { id } => {
            let neighbors = client.neighbors(&id).await?;
            match neighbors.previous {
                Some(image) => println!("previous: {}", image),
                None => println!("previous: -"),
            }
            match neighbors.next {
                Some(image) => println!("next: {}", image),
                None => println!("next: -"),
            }
        }
        Command::ListImages { limit, offset } => {
            let images = client.list_images(limit, offset).await?;
            println!("Images ({})", images.len());
            for image in images {
                println!("- {}", image);
            }
        }
        Command::AddImage {
            id,
            caption,
            location,
        } => {
            let image = client.create_image(id, caption, location).await?;
            println!("Image added: {}", image);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_post() {
        let cli = Cli::try_parse_from([
            "gallery",
            "create-post",
            "post_id2",
            "--image-id",
            "image_id",
            "--created-at",
            "2020-01-02T03:04:05Z",
        ])
        .unwrap();
        match cli.command {
            Command::CreatePost {
                id,
                image_id,
                created_at,
            } => {
                assert_eq!(id, "post_id2");
                assert_eq!(image_id, "image_id");
                assert!(created_at.is_some());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
