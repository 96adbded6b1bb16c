//! Client route table and the mount result every screen returns.

use std::fmt;

/// Sub-pages under `/interviews`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewTrack {
    Technical,
    Behavioral,
    SystemDesign,
}

impl InterviewTrack {
    fn segment(self) -> &'static str {
        match self {
            InterviewTrack::Technical => "technical",
            InterviewTrack::Behavioral => "behavioral",
            InterviewTrack::SystemDesign => "system-design",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Practice,
    Interviews(Option<InterviewTrack>),
    Companies,
    Stats,
    Login,
    Signup,
    Profile,
    InterviewSetup,
    Interview,
    InterviewResults,
    ResumeUpload,
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Practice => "/practice".to_string(),
            Route::Interviews(None) => "/interviews".to_string(),
            Route::Interviews(Some(track)) => format!("/interviews/{}", track.segment()),
            Route::Companies => "/companies".to_string(),
            Route::Stats => "/stats".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::InterviewSetup => "/interview-setup".to_string(),
            Route::Interview => "/interview".to_string(),
            Route::InterviewResults => "/interview-results".to_string(),
            Route::ResumeUpload => "/resume-upload".to_string(),
        }
    }

    /// Trailing slashes are ignored. Unknown paths are `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        let route = match trimmed {
            "/" => Route::Home,
            "/practice" => Route::Practice,
            "/interviews" => Route::Interviews(None),
            "/interviews/technical" => Route::Interviews(Some(InterviewTrack::Technical)),
            "/interviews/behavioral" => Route::Interviews(Some(InterviewTrack::Behavioral)),
            "/interviews/system-design" => Route::Interviews(Some(InterviewTrack::SystemDesign)),
            "/companies" => Route::Companies,
            "/stats" => Route::Stats,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/profile" => Route::Profile,
            "/interview-setup" => Route::InterviewSetup,
            "/interview" => Route::Interview,
            "/interview-results" => Route::InterviewResults,
            "/resume-upload" => Route::ResumeUpload,
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of mounting a screen: either it renders, or it sends the user elsewhere
/// without rendering anything.
#[derive(Debug)]
pub enum Mount<T> {
    Ready(T),
    Redirect(Route),
}

impl<T> Mount<T> {
    pub fn redirect_target(&self) -> Option<Route> {
        match self {
            Mount::Ready(_) => None,
            Mount::Redirect(route) => Some(*route),
        }
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Mount::Ready(value) => Some(value),
            Mount::Redirect(_) => None,
        }
    }
}
