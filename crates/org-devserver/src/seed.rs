//! Demo data for the development backend
//!
//! Seven organizations covering every join policy, a handful of users with
//! distinct roles, and two populated rosters.

use org_core::{Organization, PermissionGrant, User};

use crate::state::{AppState, Directory};

const LOGO_BASE: &str = "https://raw.githubusercontent.com/briannata/comp423_a3_starter/main/logos";

/// Bearer token the development backend accepts for `onyen`
pub fn token_for(onyen: &str) -> String {
    format!("{onyen}-token")
}

struct SeedOrganization {
    name: &'static str,
    shorthand: &'static str,
    slug: &'static str,
    logo: &'static str,
    short_description: &'static str,
    website: &'static str,
    heel_life: &'static str,
    public: bool,
    application_required: bool,
}

impl SeedOrganization {
    fn build(&self, id: i64) -> Organization {
        Organization {
            id: Some(id),
            short_description: self.short_description.to_string(),
            website: self.website.to_string(),
            heel_life: format!("https://heellife.unc.edu/organization/{}", self.heel_life),
            public: self.public,
            application_required: self.application_required,
            ..Organization::new(
                self.name,
                self.slug,
                self.shorthand,
                format!("{LOGO_BASE}/{}", self.logo),
            )
        }
    }
}

const ORGANIZATIONS: &[SeedOrganization] = &[
    SeedOrganization {
        name: "App Team Carolina",
        shorthand: "App Team",
        slug: "app-team",
        logo: "appteam.jpg",
        short_description: "UNC Chapel Hill's iOS development team.",
        website: "",
        heel_life: "appteamcarolina",
        public: true,
        application_required: true,
    },
    SeedOrganization {
        name: "ACM at Carolina",
        shorthand: "ACM",
        slug: "acm",
        logo: "acm.jpg",
        short_description: "Largest community and professional society for Tar Heels who study computing.",
        website: "https://linktr.ee/unc_acm",
        heel_life: "acm-at-carolina",
        public: true,
        application_required: true,
    },
    SeedOrganization {
        name: "Black in Technology",
        shorthand: "BIT",
        slug: "bit",
        logo: "bit.jpg",
        short_description: "Increasing Black and other ethnic participation in the fields of technology and Computer Science.",
        website: "https://linktr.ee/BiTunc",
        heel_life: "bit",
        public: true,
        application_required: true,
    },
    SeedOrganization {
        name: "Carolina Analytics & Data Science Club",
        shorthand: "CADS",
        slug: "cads",
        logo: "cads.png",
        short_description: "Provides students interested in Data Science opportunities to grow.",
        website: "https://carolinadata.unc.edu/",
        heel_life: "carolinadatascience",
        public: true,
        application_required: false,
    },
    SeedOrganization {
        name: "Carolina Augmented and Virtual Reality",
        shorthand: "CARVR",
        slug: "carvr",
        logo: "arvr.png",
        short_description: "Students explore XR technologies and connect to clients to create real-world applications.",
        website: "https://arvr.web.unc.edu/",
        heel_life: "carvr",
        public: true,
        application_required: true,
    },
    SeedOrganization {
        name: "CS+Social Good",
        shorthand: "CSSG",
        slug: "cssg",
        logo: "cssg.png",
        short_description: "We build apps for nonprofits and organizations for social good.",
        website: "https://cssgunc.org/",
        heel_life: "cssg",
        public: true,
        application_required: true,
    },
    SeedOrganization {
        name: "Cybersecurity CTF Club",
        shorthand: "CTF",
        slug: "ctf",
        logo: "ctf.jpg",
        short_description: "Hands-on computer security club, developing practical technical abilities through workshops and competitions.",
        website: "https://ntropy-unc.github.io/",
        heel_life: "ntropy-unc",
        public: false,
        application_required: true,
    },
];

fn users() -> Vec<(User, Vec<PermissionGrant>)> {
    fn user(id: i64, onyen: &str, first: &str, last: &str) -> User {
        let mut user = User::new(id, onyen, first, last);
        user.email = format!("{onyen}@unc.edu");
        user
    }

    vec![
        (user(1, "root", "Rhonda", "Root"), vec![PermissionGrant::administrator()]),
        (
            user(2, "xlstan", "Amy", "Ambassador"),
            vec![PermissionGrant::new("organization.get_all_users", "organization/*")],
        ),
        (user(3, "user", "Sally", "Student"), Vec::new()),
        (user(4, "ina", "Ina", "Instructor"), Vec::new()),
        (user(5, "uhlissa", "Alyssa", "Lintern"), Vec::new()),
        (user(6, "stewie", "Stewie", "Student"), Vec::new()),
        (user(7, "lambda", "Lambda", "Leader"), vec![PermissionGrant::leader_of("cssg")]),
        (user(8, "paul", "Paul", "President"), vec![PermissionGrant::leader_of("acm")]),
    ]
}

const ROSTERS: &[(&str, &[&str])] = &[("cssg", &["user", "lambda"]), ("acm", &["paul", "uhlissa"])];

/// Populate a directory with the demo data
pub fn seed_directory(directory: &Directory) {
    for (user, grants) in users() {
        directory.insert_user(user, grants);
    }
    for (id, organization) in (1..).zip(ORGANIZATIONS) {
        directory.insert_organization(organization.build(id));
    }
    for (slug, onyens) in ROSTERS {
        for onyen in *onyens {
            if let Err(e) = directory.insert_member(slug, onyen) {
                tracing::warn!(slug, onyen, error = %e, "Skipping seed membership");
            }
        }
    }
}

/// Issue the demo token for every seeded user
pub fn seed_sessions(state: &AppState) {
    for (user, _) in users() {
        state.issue_token(token_for(&user.onyen), user.onyen);
    }
}
