use hostelease_cli::{
    cli::Command,
    configuration::{ApiSettings, StorageSettings},
    Configuration,
};
use hostelease_shared::uac::Role;
use hostelease_test_helper::{MockApi, TestUser};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug)]
pub struct TestCli {
    pub api: MockApi,
    pub configuration: Configuration,
    pub test_user: TestUser,
}

pub async fn spawn_cli() -> TestCli {
    spawn_cli_with_role(Role::Student).await
}

pub async fn spawn_cli_with_role(role: Role) -> TestCli {
    let api = MockApi::spawn().await;
    let test_user = TestUser::generate(&role.to_string());
    api.add_user(&test_user, role);
    let token_file = std::env::temp_dir()
        .join(format!("hostelease-cli-{}", Uuid::new_v4()))
        .join("tokens.ron");
    let configuration = Configuration {
        api: ApiSettings {
            base_url: api.address.clone(),
        },
        storage: StorageSettings { token_file },
    };
    TestCli {
        api,
        configuration,
        test_user,
    }
}

impl TestCli {
    /// Runs the command and returns what it printed
    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        hostelease_cli::run(command, &self.configuration, &mut out).await?;
        Ok(String::from_utf8(out).expect("output should be utf8"))
    }

    pub async fn run_json(&self, command: Command) -> serde_json::Value {
        let output = self.run(command).await.expect("command failed");
        serde_json::from_str(&output).expect("output should be json")
    }

    pub async fn login(&self) -> serde_json::Value {
        self.run_json(Command::Login {
            username: self.test_user.username.clone(),
            password: self.test_user.password.clone(),
        })
        .await
    }

    pub fn token_file(&self) -> &PathBuf {
        &self.configuration.storage.token_file
    }
}

impl Drop for TestCli {
    fn drop(&mut self) {
        if let Some(dir) = self.token_file().parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
