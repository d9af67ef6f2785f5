use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::StepError;
use crate::gherkin::DataTable;
use crate::http::ApiClient;

use super::context::{RepositoryRef, World};

const SEARCH_PATH: &str = "/search/repositories";
const USER_REPOS_PATH: &str = "/user/repos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    AnonymousUser,
    SearchFor,
    ExpectResponseCode,
    ExpectSuccessfulRequest,
    ExpectFailedRequest,
    ExpectAtLeastResults,
    AuthenticatedUser,
    ListMyRepositories,
    ResultsIncludeRepository,
    CreateRepository,
    HaveRepositoryCalled,
    WatchRepository,
    ListedAsWatcher,
    DeleteRepository,
    HaveFollowingRepositories,
    WatchEachRepository,
    WatchListIncludesRepositories,
}

impl StepKind {
    pub const ALL: [StepKind; 17] = [
        StepKind::AnonymousUser,
        StepKind::SearchFor,
        StepKind::ExpectResponseCode,
        StepKind::ExpectSuccessfulRequest,
        StepKind::ExpectFailedRequest,
        StepKind::ExpectAtLeastResults,
        StepKind::AuthenticatedUser,
        StepKind::ListMyRepositories,
        StepKind::ResultsIncludeRepository,
        StepKind::CreateRepository,
        StepKind::HaveRepositoryCalled,
        StepKind::WatchRepository,
        StepKind::ListedAsWatcher,
        StepKind::DeleteRepository,
        StepKind::HaveFollowingRepositories,
        StepKind::WatchEachRepository,
        StepKind::WatchListIncludesRepositories,
    ];

    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            StepKind::AnonymousUser => "I am an anonymous user",
            StepKind::SearchFor => "I search for :query",
            StepKind::ExpectResponseCode => "I expect a :code response code",
            StepKind::ExpectSuccessfulRequest => "I expect a successful request",
            StepKind::ExpectFailedRequest => "I expect a failed request",
            StepKind::ExpectAtLeastResults => "I expect at least :count result(s)",
            StepKind::AuthenticatedUser => "I am an authenticated user",
            StepKind::ListMyRepositories => "I request a list of my repositories",
            StepKind::ResultsIncludeRepository => {
                "The results should include a repository name(d) :name"
            }
            StepKind::CreateRepository => "I create the :name repository",
            StepKind::HaveRepositoryCalled => "I have a repository called :name",
            StepKind::WatchRepository => "I watch the :name repository",
            StepKind::ListedAsWatcher => "The :name repository will list me as a watcher",
            StepKind::DeleteRepository => "I delete the repository called :name",
            StepKind::HaveFollowingRepositories => "I have the following repositories:",
            StepKind::WatchEachRepository => "I watch each repository",
            StepKind::WatchListIncludesRepositories => {
                "My watch list will include those repositories"
            }
        }
    }
}

impl World {
    /// Runs one matched step against this scenario's state.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure when the remote API does not answer as
    /// expected, or a usage error when the scenario is missing a prerequisite.
    pub async fn execute(
        &mut self,
        kind: StepKind,
        args: &[String],
        table: Option<&DataTable>,
    ) -> Result<(), StepError> {
        match kind {
            StepKind::AnonymousUser => {
                debug!("Continuing as an anonymous user");
                Ok(())
            }
            StepKind::SearchFor => self.search_for(arg(args, 0)?).await,
            StepKind::ExpectResponseCode => self.expect_status(parse_status(arg(args, 0)?)?),
            StepKind::ExpectSuccessfulRequest => self.expect_successful_request(),
            StepKind::ExpectFailedRequest => self.expect_failed_request(),
            StepKind::ExpectAtLeastResults => self.expect_at_least(arg(args, 0)?),
            StepKind::AuthenticatedUser => self.authenticate().await,
            StepKind::ListMyRepositories => self.list_my_repositories().await,
            StepKind::ResultsIncludeRepository => self.results_include(arg(args, 0)?),
            StepKind::CreateRepository => self.create_repository(arg(args, 0)?).await,
            StepKind::HaveRepositoryCalled => {
                self.search_for(arg(args, 0)?).await?;
                self.expect_status(200)
            }
            StepKind::WatchRepository => self.watch_repository(arg(args, 0)?).await,
            StepKind::ListedAsWatcher => self.listed_as_watcher(arg(args, 0)?).await,
            StepKind::DeleteRepository => self.delete_repository(arg(args, 0)?).await,
            StepKind::HaveFollowingRepositories => {
                let table = table.ok_or(StepError::MissingTable {
                    phrase: kind.phrase(),
                })?;
                self.have_following_repositories(table).await
            }
            StepKind::WatchEachRepository => self.watch_each_repository().await,
            StepKind::WatchListIncludesRepositories => self.watch_list_includes().await,
        }
    }

    async fn search_for(&mut self, query: &str) -> Result<(), StepError> {
        let client = ApiClient::anonymous(&self.settings)?;
        let response = client
            .get_with_query(SEARCH_PATH, &[("q", query)])
            .await?;
        self.record(response);
        Ok(())
    }

    fn expect_successful_request(&self) -> Result<(), StepError> {
        let response = self.response()?;
        if !response.is_success() {
            return Err(StepError::assertion(format!(
                "We expected a successful request but received a {} instead!",
                response.status
            )));
        }
        Ok(())
    }

    fn expect_failed_request(&self) -> Result<(), StepError> {
        let response = self.response()?;
        if !response.is_client_error() {
            return Err(StepError::assertion(format!(
                "We expected a failed request but received a {} instead!",
                response.status
            )));
        }
        Ok(())
    }

    fn expect_at_least(&self, count: &str) -> Result<(), StepError> {
        let expected: u64 = count
            .trim()
            .parse()
            .map_err(|err| StepError::InvalidNumber {
                value: count.to_owned(),
                source: err,
            })?;
        let total = self
            .response_json()?
            .get("total_count")
            .and_then(Value::as_u64)
            .ok_or(StepError::UnexpectedShape {
                expected: "an object with a numeric total_count",
            })?;
        if total < expected {
            return Err(StepError::assertion(format!(
                "We expected at least {} results but found: {}",
                expected, total
            )));
        }
        Ok(())
    }

    async fn authenticate(&mut self) -> Result<(), StepError> {
        let client = ApiClient::authenticated(&self.settings, self.credentials()?)?;
        info!("Authenticating as {}", self.username()?);
        let response = client.get("/").await?;
        self.client = Some(client);
        self.record(response);
        self.expect_status(200)
    }

    async fn list_my_repositories(&mut self) -> Result<(), StepError> {
        let response = self.client()?.get(USER_REPOS_PATH).await?;
        self.record(response);
        self.expect_status(200)
    }

    fn results_include(&self, name: &str) -> Result<(), StepError> {
        let body = self.response_json()?;
        let repositories = body.as_array().ok_or(StepError::UnexpectedShape {
            expected: "a JSON array of repositories",
        })?;
        let found = repositories
            .iter()
            .any(|repository| repository.get("name").and_then(Value::as_str) == Some(name));
        if !found {
            return Err(StepError::assertion(format!(
                "Expected to find a repository named '{}' but didn't.",
                name
            )));
        }
        Ok(())
    }

    async fn create_repository(&mut self, name: &str) -> Result<(), StepError> {
        let response = self
            .client()?
            .post_json(USER_REPOS_PATH, &json!({ "name": name }))
            .await?;
        self.record(response);
        self.expect_status(201)
    }

    async fn watch_repository(&mut self, name: &str) -> Result<(), StepError> {
        let path = format!("repos/{}/{}/subscription", self.username()?, name);
        let response = self
            .client()?
            .put_json(&path, &json!({ "subscribed": true }))
            .await?;
        self.record(response);
        Ok(())
    }

    async fn listed_as_watcher(&mut self, name: &str) -> Result<(), StepError> {
        let path = format!("repos/{}/{}/subscription", self.username()?, name);
        let response = self.client()?.get(&path).await?;
        self.record(response);
        self.expect_status(200)
    }

    async fn delete_repository(&mut self, name: &str) -> Result<(), StepError> {
        let path = format!("repos/{}/{}", self.username()?, name);
        let response = self.client()?.delete(&path).await?;
        self.record(response);
        self.expect_status(204)
    }

    async fn have_following_repositories(&mut self, table: &DataTable) -> Result<(), StepError> {
        let mut repositories = Vec::with_capacity(table.body().len());
        for (index, row) in table.body().iter().enumerate() {
            let (Some(owner), Some(name)) = (row.first(), row.get(1)) else {
                return Err(StepError::ShortTableRow {
                    row: index.saturating_add(1),
                });
            };
            let repository = RepositoryRef {
                owner: owner.clone(),
                name: name.clone(),
            };
            let path = format!("/repos/{}", repository.full_name());
            let response = self.client()?.get(&path).await?;
            self.record(response);
            self.expect_status(200)?;
            repositories.push(repository);
        }
        self.repositories = Some(repositories);
        Ok(())
    }

    async fn watch_each_repository(&mut self) -> Result<(), StepError> {
        let paths: Vec<String> = self
            .repositories
            .as_ref()
            .ok_or(StepError::NoRepositoryTable)?
            .iter()
            .map(|repository| format!("/repos/{}/subscription", repository.full_name()))
            .collect();
        let body = json!({ "subscribed": true });
        for path in paths {
            let response = self.client()?.put_json(&path, &body).await?;
            self.record(response);
        }
        Ok(())
    }

    async fn watch_list_includes(&mut self) -> Result<(), StepError> {
        let expected = self
            .repositories
            .clone()
            .ok_or(StepError::NoRepositoryTable)?;
        let username = self.username()?.to_owned();
        let path = format!("/users/{}/subscriptions", username);
        let response = self.client()?.get(&path).await?;
        self.record(response);

        let body = self.response_json()?;
        let watches = body.as_array().ok_or(StepError::UnexpectedShape {
            expected: "a JSON array of subscriptions",
        })?;
        for repository in &expected {
            let full_name = repository.full_name();
            let watching = watches.iter().any(|watch| {
                watch.get("full_name").and_then(Value::as_str) == Some(full_name.as_str())
            });
            if !watching {
                return Err(StepError::assertion(format!(
                    "Error! {} is not watching {}",
                    username, full_name
                )));
            }
        }
        Ok(())
    }
}

fn arg(args: &[String], index: usize) -> Result<&str, StepError> {
    args.get(index)
        .map(String::as_str)
        .ok_or(StepError::MissingArgument { index })
}

fn parse_status(value: &str) -> Result<u16, StepError> {
    value
        .trim()
        .parse()
        .map_err(|err| StepError::InvalidNumber {
            value: value.to_owned(),
            source: err,
        })
}
