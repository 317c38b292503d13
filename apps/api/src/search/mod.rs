// Personalized job search.
// Implements: profile normalization, query construction, relevance scoring,
// and the request pipeline that ties them to the profile store and JSearch.

pub mod handlers;
pub mod normalize;
pub mod orchestrator;
pub mod query;
pub mod scoring;
