use crate::domain::{PullRequest, ReleaseMarker};
use crate::error::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Select the pull requests that belong in the next release.
///
/// `pulls` must be newest-first by merge date. Unmerged pull requests and
/// release pull requests are dropped. With a cutoff, only pull requests merged
/// strictly after it are kept, and scanning stops at the first one merged
/// before it. Forge order is preserved.
pub fn collect_pull_requests<I>(
    pulls: I,
    cutoff: Option<DateTime<Utc>>,
    marker: &ReleaseMarker,
) -> Result<Vec<PullRequest>>
where
    I: IntoIterator<Item = Result<PullRequest>>,
{
    let mut collected = Vec::new();

    for pull in pulls {
        let pull = pull?;

        let Some(merged_at) = pull.merged_at else {
            debug!(number = pull.number, "Skipping unmerged pull request");
            continue;
        };

        if let Some(cutoff) = cutoff {
            if merged_at < cutoff {
                debug!(number = pull.number, %merged_at, "Reached previous release");
                break;
            }
            if merged_at == cutoff {
                continue;
            }
        }

        if marker.matches(&pull.title) {
            debug!(number = pull.number, title = %pull.title, "Skipping release pull request");
            continue;
        }

        collected.push(pull);
    }

    debug!(count = collected.len(), "Collected pull requests");
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pull_request::fixtures::pull_request;
    use crate::error::ReleaseMakerError;

    fn marker() -> ReleaseMarker {
        ReleaseMarker::new("🔖").unwrap()
    }

    fn cutoff(ts: &str) -> Option<DateTime<Utc>> {
        Some(DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc))
    }

    fn numbers(pulls: &[PullRequest]) -> Vec<u64> {
        pulls.iter().map(|p| p.number).collect()
    }

    #[test]
    fn test_skips_unmerged_and_release_pulls() {
        let pulls = vec![
            pull_request(5, "🔖 Release 1.2.0 into master", Some("2021-01-05T00:00:00Z")),
            pull_request(4, "✨ add X", Some("2021-01-04T00:00:00Z")),
            pull_request(3, "closed without merge", None),
            pull_request(2, "🔖 release 1.1.0", Some("2021-01-02T00:00:00Z")),
            pull_request(1, "🐛 fix Y", Some("2021-01-01T00:00:00Z")),
        ];

        let collected = collect_pull_requests(pulls.into_iter().map(Ok), None, &marker()).unwrap();
        assert_eq!(numbers(&collected), vec![4, 1]);
    }

    #[test]
    fn test_stops_at_cutoff() {
        let pulls = vec![
            Ok(pull_request(3, "✨ new", Some("2021-02-01T00:00:00Z"))),
            Ok(pull_request(2, "✨ old", Some("2020-12-01T00:00:00Z"))),
            Err(ReleaseMakerError::forge("must not be reached")),
        ];

        let collected =
            collect_pull_requests(pulls, cutoff("2021-01-01T00:00:00Z"), &marker()).unwrap();
        assert_eq!(numbers(&collected), vec![3]);
    }

    #[test]
    fn test_merge_at_cutoff_is_excluded() {
        let pulls = vec![
            pull_request(2, "✨ after", Some("2021-01-01T00:00:01Z")),
            pull_request(1, "✨ same instant", Some("2021-01-01T00:00:00Z")),
        ];

        let collected = collect_pull_requests(
            pulls.into_iter().map(Ok),
            cutoff("2021-01-01T00:00:00Z"),
            &marker(),
        )
        .unwrap();
        assert_eq!(numbers(&collected), vec![2]);
    }

    #[test]
    fn test_no_cutoff_includes_everything_merged() {
        let pulls = vec![
            pull_request(2, "✨ a", Some("2015-01-01T00:00:00Z")),
            pull_request(1, "🐛 b", Some("2010-01-01T00:00:00Z")),
        ];

        let collected = collect_pull_requests(pulls.into_iter().map(Ok), None, &marker()).unwrap();
        assert_eq!(numbers(&collected), vec![2, 1]);
    }

    #[test]
    fn test_errors_propagate() {
        let pulls = vec![Err(ReleaseMakerError::http("u", 500, "boom"))];
        assert!(collect_pull_requests(pulls, None, &marker()).is_err());
    }
}
