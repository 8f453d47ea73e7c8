use super::{finish, restore_session};
use clap::{Args, Subcommand};
use eyre::Result;
use lifeplan_client::settings::Settings;
use lifeplan_client::views::ProfileView;
use lifeplan_common::api::UpdateProfileRequest;
use lifeplan_common::domain::Profile;

#[derive(Args, Debug)]
pub struct UpdateCmd {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    /// Avatar image URL
    #[arg(long)]
    avatar: Option<String>,
    #[arg(long)]
    birthday: Option<String>,
    #[arg(long)]
    telegram: Option<String>,
    /// Centimeters
    #[arg(long)]
    height: Option<f64>,
    /// Kilograms
    #[arg(long)]
    weight: Option<f64>,
}

impl From<UpdateCmd> for UpdateProfileRequest {
    fn from(value: UpdateCmd) -> Self {
        Self {
            name: value.name,
            bio: value.bio,
            avatar: value.avatar,
            birthday: value.birthday,
            telegram: value.telegram,
            height: value.height,
            weight: value.weight,
        }
    }
}

#[derive(Subcommand, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// Show your profile
    Show,
    /// Change profile fields. Only the given fields are sent
    Update(UpdateCmd),
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let Some(auth) = restore_session(settings).await? else {
            return Ok(());
        };
        let mut view = ProfileView::new(auth.client().clone());

        match self {
            Self::Show => {
                view.load().await;
            }
            Self::Update(cmd) => {
                view.update(&cmd.into()).await;
            }
        }

        if let Some(profile) = view.profile() {
            print_profile(profile);
        }
        finish(view.take_notices())
    }
}

fn print_profile(profile: &Profile) {
    println!("Name:     {}", profile.name);
    println!("Email:    {}", profile.email);
    let optional = [
        ("Bio", profile.bio.clone()),
        ("Avatar", profile.avatar.clone()),
        ("Birthday", profile.birthday.clone()),
        ("Telegram", profile.telegram.clone()),
        ("Height", profile.height.map(|x| x.to_string())),
        ("Weight", profile.weight.map(|x| x.to_string())),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("{:<9} {value}", format!("{label}:"));
        }
    }
}
