//! Line-oriented terminal front-end. Each input line is one command against the
//! current screen; output is returned as lines so the loop in `main` stays dumb.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::api::QuestionRequest;
use crate::auth::{AuthService, SignupForm};
use crate::catalog::{self, ProblemFilter};
use crate::models::{Difficulty, InterviewStructure, InterviewType, Speaker};
use crate::profile::ProfileScreen;
use crate::results::{InsightKind, InterviewResults};
use crate::routes::{Mount, Route};
use crate::session::clock::format_clock;
use crate::session::whiteboard::Color;
use crate::session::{InterviewSession, Tab};
use crate::storage::LocalStorage;
use crate::upload::ResumeUpload;
use crate::wizard::{SetupWizard, SUGGESTED_DOMAINS, TOTAL_STEPS};

const MAX_REDIRECTS: usize = 4;
const WHITEBOARD_EXPORT_SIZE: (u32, u32) = (800, 600);
const QUESTIONS_USAGE: &str =
    "Usage: questions <full|focused|quick> <level> <dsa|web|ml|core>";

pub enum Flow {
    Continue(Vec<String>),
    Quit,
}

pub struct Shell {
    storage: Arc<dyn LocalStorage>,
    auth: AuthService,
    route: Route,
    wizard: SetupWizard,
    session: Option<InterviewSession>,
    results: Option<InterviewResults>,
    profile: Option<ProfileScreen>,
    upload: Option<ResumeUpload>,
    filter: ProblemFilter,
    /// Generated questions used to seed the next session.
    seeded_questions: Vec<String>,
}

impl Shell {
    pub fn new(storage: Arc<dyn LocalStorage>, auth: AuthService) -> Self {
        Self {
            storage,
            auth,
            route: Route::Home,
            wizard: SetupWizard::new(),
            session: None,
            results: None,
            profile: None,
            upload: None,
            filter: ProblemFilter::default(),
            seeded_questions: Vec::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> Option<&InterviewSession> {
        self.session.as_ref()
    }

    /// Mounts `target`, following redirects, and renders the screen it lands on.
    pub async fn navigate(&mut self, target: Route) -> Vec<String> {
        let mut out = Vec::new();
        let mut target = target;

        for _ in 0..=MAX_REDIRECTS {
            // Leaving the interview screen unmounts it, which stops its tasks.
            if target != Route::Interview {
                self.session = None;
            }
            match self.mount(target).await {
                None => {
                    self.route = target;
                    out.extend(self.render());
                    return out;
                }
                Some(next) => {
                    out.push(format!("(redirected from {target} to {next})"));
                    target = next;
                }
            }
        }
        warn!("Redirect loop while navigating to {target}");
        out.push("Too many redirects".to_string());
        out
    }

    /// Returns the redirect target when the screen refuses to mount.
    async fn mount(&mut self, route: Route) -> Option<Route> {
        let storage = Arc::clone(&self.storage);
        match route {
            Route::InterviewSetup => {
                self.wizard = SetupWizard::new();
                None
            }
            Route::Interview => {
                if self.session.is_some() && self.route == Route::Interview {
                    return None;
                }
                let questions = std::mem::take(&mut self.seeded_questions);
                redirect_or(InterviewSession::mount(storage.as_ref(), questions), |s| {
                    self.session = Some(s)
                })
            }
            Route::InterviewResults => {
                redirect_or(InterviewResults::mount(storage.as_ref()), |r| {
                    self.results = Some(r)
                })
            }
            Route::Profile => {
                let mount = ProfileScreen::mount(storage.as_ref(), self.auth.api()).await;
                redirect_or(mount, |p| self.profile = Some(p))
            }
            Route::ResumeUpload => {
                redirect_or(ResumeUpload::mount(storage.as_ref()), |u| {
                    self.upload = Some(u)
                })
            }
            _ => None,
        }
    }

    pub async fn handle(&mut self, line: &str) -> Flow {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let out = match command {
            "" => Vec::new(),
            "quit" | "exit" => return Flow::Quit,
            "help" => self.help(),
            "go" => match Route::parse(rest) {
                Some(route) => self.navigate(route).await,
                None => vec![format!("Unknown page '{rest}'")],
            },
            "logout" => match self.auth.logout() {
                Ok(route) => self.navigate(route).await,
                Err(e) => vec![e.to_string()],
            },
            _ => self.screen_command(command, rest).await,
        };
        Flow::Continue(out)
    }

    async fn screen_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        match self.route {
            Route::Login => self.login_command(command, rest).await,
            Route::Signup => self.signup_command(command, rest).await,
            Route::InterviewSetup => self.setup_command(command, rest).await,
            Route::Interview => self.interview_command(command, rest).await,
            Route::Practice if command == "filter" => {
                let mut parts = rest.splitn(2, ' ');
                let difficulty = parts.next().unwrap_or("all");
                let kind = parts.next().unwrap_or("all");
                self.filter = ProblemFilter::from_selection(difficulty, kind);
                self.render()
            }
            Route::ResumeUpload => self.upload_command(command, rest).await,
            Route::Profile => self.profile_command(command, rest).await,
            _ => vec![format!("Unknown command '{command}' (try 'help')")],
        }
    }

    async fn login_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        if command != "login" {
            return vec!["Usage: login <email> <password>".to_string()];
        }
        let (email, password) = rest.split_once(' ').unwrap_or((rest, ""));
        match self.auth.login(email, password.trim()).await {
            Ok(route) => self.navigate(route).await,
            Err(e) => vec![e.to_string()],
        }
    }

    async fn signup_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        let mut parts = rest.splitn(4, ' ');
        if command != "signup" {
            return vec!["Usage: signup <email> <password> <confirm> <full name>".to_string()];
        }
        let form = SignupForm {
            email: parts.next().unwrap_or_default().to_string(),
            password: parts.next().unwrap_or_default().to_string(),
            confirm_password: parts.next().unwrap_or_default().to_string(),
            name: parts.next().unwrap_or_default().to_string(),
        };
        match self.auth.signup(&form).await {
            Ok(route) => self.navigate(route).await,
            Err(e) => vec![e.to_string()],
        }
    }

    async fn setup_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        let result = match command {
            "domain" => {
                // A number picks from the suggested list; anything else is taken verbatim.
                let domain = rest
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| SUGGESTED_DOMAINS.get(i.wrapping_sub(1)))
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| rest.to_string());
                self.wizard.set_domain(domain);
                Ok(())
            }
            "jd" => {
                self.wizard.set_job_description(rest);
                Ok(())
            }
            "type" => InterviewType::from_id(rest)
                .map(|t| self.wizard.set_interview_type(t))
                .ok_or_else(|| format!("Unknown interview type '{rest}'")),
            "structure" => InterviewStructure::from_id(rest)
                .map(|s| self.wizard.set_structure(s))
                .ok_or_else(|| format!("Unknown structure '{rest}'")),
            "difficulty" => Difficulty::parse(rest)
                .map(|d| self.wizard.set_difficulty(d))
                .ok_or_else(|| format!("Unknown difficulty '{rest}'")),
            "next" => self.wizard.next().map(|_| ()).map_err(|e| e.to_string()),
            "back" => {
                self.wizard.back();
                Ok(())
            }
            "start" => {
                return match self.wizard.start(self.storage.as_ref()) {
                    Ok(route) => self.navigate(route).await,
                    Err(e) => vec![e.to_string()],
                };
            }
            _ => Err(format!("Unknown command '{command}' (try 'help')")),
        };

        match result {
            Ok(()) => self.render(),
            Err(message) => vec![message],
        }
    }

    async fn interview_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        if command == "end" {
            let Some(session) = self.session.take() else {
                return vec!["No interview in progress".to_string()];
            };
            return match session.end(self.storage.as_ref()) {
                Ok(route) => self.navigate(route).await,
                Err(e) => vec![format!("Could not save interview: {e}")],
            };
        }

        let Some(session) = self.session.as_mut() else {
            return vec!["No interview in progress".to_string()];
        };

        let result: Result<(), String> = match command {
            "say" => {
                if session.send(rest) {
                    Ok(())
                } else {
                    Err("Type a message first".to_string())
                }
            }
            "code" => {
                session.code.push_str(rest);
                session.code.push('\n');
                Ok(())
            }
            "tab" => match rest {
                "code" => {
                    session.tab = Tab::Code;
                    Ok(())
                }
                "whiteboard" => {
                    session.tab = Tab::Whiteboard;
                    Ok(())
                }
                _ => Err("Usage: tab code|whiteboard".to_string()),
            },
            "mic" => {
                session.toggle_recording();
                Ok(())
            }
            "video" => {
                session.toggle_video();
                Ok(())
            }
            "color" => rest
                .parse::<Color>()
                .map(|c| session.whiteboard.set_color(c))
                .map_err(|e| e.to_string()),
            "width" => rest
                .parse::<u32>()
                .map(|w| session.whiteboard.set_width(w))
                .map_err(|_| "Usage: width <1-20>".to_string()),
            "down" | "move" => match parse_point(rest) {
                Some((x, y)) if command == "down" => {
                    session.whiteboard.pointer_down(x, y);
                    Ok(())
                }
                Some((x, y)) => {
                    session.whiteboard.pointer_move(x, y);
                    Ok(())
                }
                None => Err(format!("Usage: {command} <x> <y>")),
            },
            "up" => {
                session.whiteboard.pointer_up();
                Ok(())
            }
            "clear" => {
                session.whiteboard.clear();
                Ok(())
            }
            "export" => {
                let path = PathBuf::from(if rest.is_empty() { "whiteboard.png" } else { rest });
                let (w, h) = WHITEBOARD_EXPORT_SIZE;
                session
                    .whiteboard
                    .save_png(&path, w, h)
                    .map(|_| debug!("Whiteboard exported to {}", path.display()))
                    .map_err(|e| format!("Export failed: {e}"))
            }
            "status" => Ok(()),
            _ => Err(format!("Unknown command '{command}' (try 'help')")),
        };

        match result {
            Ok(()) => self.render(),
            Err(message) => vec![message],
        }
    }

    async fn upload_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        let Some(upload) = self.upload.as_mut() else {
            return vec!["Upload screen is not mounted".to_string()];
        };

        match command {
            "file" => {
                let content = match tokio::fs::read(rest).await {
                    Ok(bytes) => Bytes::from(bytes),
                    Err(e) => return vec![format!("Cannot read {rest}: {e}")],
                };
                let name = std::path::Path::new(rest)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(rest)
                    .to_string();
                match upload.select_file(&name, content) {
                    Ok(()) => vec![format!("Selected {name}")],
                    Err(message) => vec![message],
                }
            }
            "upload" => {
                let Some(api) = self.auth.api() else {
                    return vec![
                        "Resume upload needs the backend (set FIREBASE_API_KEY)".to_string(),
                    ];
                };
                match upload.upload(api, self.storage.as_ref()).await {
                    Ok(route) => self.navigate(route).await,
                    Err(failure) => {
                        let mut out = vec![failure.banner];
                        if let Some(route) = failure.redirect {
                            out.extend(self.navigate(route).await);
                        }
                        out
                    }
                }
            }
            _ => vec![format!("Unknown command '{command}' (try 'help')")],
        }
    }

    async fn profile_command(&mut self, command: &str, rest: &str) -> Vec<String> {
        let uid = self
            .profile
            .as_ref()
            .and_then(|p| p.user.uid.clone());
        let (Some(api), Some(uid)) = (self.auth.api(), uid) else {
            return vec![format!("Unknown command '{command}' (try 'help')")];
        };

        match command {
            "recommend" => match api.get_recommendations(&uid).await {
                Ok(r) => {
                    let rec = r.recommendations;
                    vec![
                        format!("Goal: {} ({})", rec.goal, rec.reasoning.goal_reason),
                        format!("Level: {} ({})", rec.target_level, rec.reasoning.level_reason),
                        format!("Domain: {} ({})", rec.domain, rec.reasoning.domain_reason),
                    ]
                }
                Err(e) => vec![e.to_string()],
            },
            "questions" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let [goal, level, domain] = parts.as_slice() else {
                    return vec![QUESTIONS_USAGE.to_string()];
                };
                let request = QuestionRequest {
                    uid,
                    goal: goal.to_string(),
                    level: level.to_string(),
                    domain: domain.to_string(),
                };
                match api.generate_questions(&request).await {
                    Ok(generated) => {
                        let mut out = vec![format!(
                            "{} questions ready for your next interview:",
                            generated.total
                        )];
                        out.extend(generated.questions.iter().enumerate().map(|(i, q)| {
                            format!("  {}. [{}/{}] {}", i + 1, q.kind, q.difficulty, q.question)
                        }));
                        self.seeded_questions =
                            generated.questions.into_iter().map(|q| q.question).collect();
                        out
                    }
                    Err(e) => vec![e.to_string()],
                }
            }
            _ => vec![format!("Unknown command '{command}' (try 'help')")],
        }
    }

    fn help(&self) -> Vec<String> {
        let mut out: Vec<String> = [
            "go <path>        open a page (/, /practice, /interviews, /companies, /stats,",
            "                 /login, /signup, /profile, /interview-setup, /resume-upload)",
            "logout | quit",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let screen: &[&str] = match self.route {
            Route::Login => &["login <email> <password>"],
            Route::Signup => &["signup <email> <password> <confirm> <full name>"],
            Route::InterviewSetup => &[
                "domain <n|text>  jd <text>  type <id>  structure <id>",
                "difficulty <easy|medium|hard>",
                "next  back  start",
            ],
            Route::Interview => &[
                "say <text>  code <line>  tab code|whiteboard  mic  video  status  end",
                "color #rrggbb  width <n>  down <x> <y>  move <x> <y>  up  clear",
                "export [file.png]",
            ],
            Route::Practice => &[
                "filter <all|easy|medium|hard> <all|technical|behavioral|system design>",
            ],
            Route::ResumeUpload => &["file <path.pdf>  upload"],
            Route::Profile => &["recommend  questions <goal> <level> <domain>"],
            _ => &[],
        };
        out.extend(screen.iter().map(|s| s.to_string()));
        out
    }

    fn render(&self) -> Vec<String> {
        match self.route {
            Route::Home => vec![
                "Interview Prep".to_string(),
                "Practice with an AI interviewer. Try 'go /interview-setup'.".to_string(),
            ],
            Route::Practice => render_practice(self.filter),
            Route::Interviews(_) => catalog::INTERVIEW_TRACKS
                .iter()
                .map(|t| format!("{} ({}) - {} -> {}", t.title, t.count, t.description, t.route))
                .collect(),
            Route::Companies => catalog::COMPANIES
                .iter()
                .map(|c| {
                    format!(
                        "{}: {} questions, {} difficulty, {} success rate [{}]",
                        c.name,
                        c.question_count,
                        c.difficulty,
                        c.success_rate,
                        c.topics.join(", ")
                    )
                })
                .collect(),
            Route::Stats => render_stats(),
            Route::Login => vec!["Welcome Back! login <email> <password>".to_string()],
            Route::Signup => {
                vec!["Join Us! signup <email> <password> <confirm> <full name>".to_string()]
            }
            Route::Profile => self.render_profile(),
            Route::InterviewSetup => self.render_setup(),
            Route::Interview => self.render_session(),
            Route::InterviewResults => self.render_results(),
            Route::ResumeUpload => self.render_upload(),
        }
    }

    fn render_profile(&self) -> Vec<String> {
        let Some(profile) = &self.profile else {
            return Vec::new();
        };
        let mut out = vec![format!("{} <{}>", profile.user.name, profile.user.email)];
        match &profile.resume {
            Some(resume) => {
                out.push(format!(
                    "Resume: {} | {} skills | {} projects",
                    resume.full_name.as_deref().unwrap_or("(unnamed)"),
                    resume.skills.len(),
                    resume.projects.len()
                ));
                if !resume.skills.is_empty() {
                    out.push(format!("Skills: {}", resume.skills.join(", ")));
                }
            }
            None if self.auth.is_backend() => {
                out.push("No resume yet. 'go /resume-upload' to add one.".to_string())
            }
            None => {}
        }
        out.push("Recent interviews:".to_string());
        out.extend(profile.recent_interviews().iter().map(|i| {
            format!("  {} @ {}: {} ({})", i.kind, i.company, i.score, i.when)
        }));
        out
    }

    fn render_setup(&self) -> Vec<String> {
        let w = &self.wizard;
        let mut out = vec![format!(
            "Setup Your Interview - Step {} of {TOTAL_STEPS} ({:.0}%)",
            w.step(),
            w.progress() * 100.0
        )];
        match w.step() {
            1 => {
                out.push(format!("Domain: {}", display_or_dash(w.domain())));
                out.extend(
                    SUGGESTED_DOMAINS
                        .iter()
                        .enumerate()
                        .map(|(i, d)| format!("  {}. {d}", i + 1)),
                );
            }
            2 => out.push(format!(
                "Job description (optional): {}",
                display_or_dash(w.job_description())
            )),
            3 => out.extend(InterviewType::ALL.iter().map(|t| {
                let mark = if w.interview_type() == Some(*t) { "*" } else { " " };
                format!(" {mark} {:<14} {} - {}", t.id(), t.name(), t.description())
            })),
            _ => {
                out.extend(InterviewStructure::ALL.iter().map(|s| {
                    let mark = if w.structure() == Some(*s) { "*" } else { " " };
                    format!(" {mark} {:<10} {} - {}", s.id(), s.name(), s.description())
                }));
                out.push(format!("Difficulty: {}", w.difficulty()));
            }
        }
        out
    }

    fn render_session(&self) -> Vec<String> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let mut out = vec![
            format!(
                "{} - {} [{}]{}{}",
                session.title(),
                session.config().domain,
                session.clock_display(),
                if session.recording { " mic" } else { "" },
                if session.video_on { " video" } else { "" },
            ),
            format!("Interviewer: {}", session.subtitle()),
        ];
        for message in session.messages() {
            let who = match message.speaker {
                Speaker::Ai => "AI ",
                Speaker::User => "You",
            };
            out.push(format!("  {who}: {}", message.message));
        }
        match session.tab {
            Tab::Code => {
                out.push("--- code ---".to_string());
                out.extend(session.code.lines().map(str::to_string));
            }
            Tab::Whiteboard => out.push(format!(
                "--- whiteboard: {} strokes, pen {} {}px ---",
                session.whiteboard.strokes().len(),
                session.whiteboard.color(),
                session.whiteboard.width()
            )),
        }
        out
    }

    fn render_results(&self) -> Vec<String> {
        let Some(results) = &self.results else {
            return Vec::new();
        };
        let metrics = results.metrics();
        let mut out = vec![
            format!(
                "{} Score {}/100 ({}/10) {}",
                results.rating(),
                results.score,
                results.score_out_of_ten(),
                "*".repeat(results.stars() as usize)
            ),
            format!(
                "Duration {} | {} responses | avg {}s per response",
                results.duration_display(),
                metrics.responses,
                metrics.avg_response_secs
            ),
        ];
        for insight in results.insights() {
            let tag = match insight.kind {
                InsightKind::Strength => "+",
                InsightKind::Improvement => "-",
            };
            out.push(format!("  {tag} {}: {}", insight.title, insight.description));
        }
        for (skill, score) in results.skill_breakdown() {
            out.push(format!("  {skill:<20} {score}"));
        }
        out.push("Timeline:".to_string());
        out.extend(
            results
                .timeline()
                .iter()
                .map(|m| format!("  {} {}", m.timestamp.format("%H:%M:%S"), m.message)),
        );
        out.push(format!(
            "Recorded {} after {}",
            results.record.completed_at.format("%Y-%m-%d %H:%M"),
            format_clock(results.record.duration)
        ));
        out
    }

    fn render_upload(&self) -> Vec<String> {
        let Some(upload) = &self.upload else {
            return Vec::new();
        };
        let mut out = vec![match upload.file() {
            Some(file) => format!("Selected: {} ({} bytes)", file.name, file.content.len()),
            None => "No file selected. 'file <path.pdf>' to choose one.".to_string(),
        }];
        if upload.progress() > 0 {
            out.push(format!("Progress: {}%", upload.progress()));
        }
        if let Some(error) = upload.error() {
            out.push(format!("! {error}"));
        }
        out
    }
}

/// Stores the mounted screen, or hands back where to go instead.
fn redirect_or<T>(mount: Mount<T>, store: impl FnOnce(T)) -> Option<Route> {
    match mount {
        Mount::Ready(screen) => {
            store(screen);
            None
        }
        Mount::Redirect(route) => Some(route),
    }
}

fn parse_point(raw: &str) -> Option<(f32, f32)> {
    let (x, y) = raw.split_once(' ')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn render_practice(filter: ProblemFilter) -> Vec<String> {
    let problems = catalog::filter_problems(filter);
    if problems.is_empty() {
        return vec!["No problems match this filter".to_string()];
    }
    problems
        .iter()
        .map(|p| {
            format!(
                "{} {:<24} {:<6} {:<13} {:<13} {} [{}]",
                if p.solved { "[x]" } else { "[ ]" },
                p.title,
                p.difficulty,
                p.kind.label(),
                p.category,
                p.time_estimate,
                p.ai_features.join(", ")
            )
        })
        .collect()
}

fn render_stats() -> Vec<String> {
    let mut out: Vec<String> = catalog::HEADLINE_STATS
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    out.push("Skill progress:".to_string());
    out.extend(
        catalog::SKILL_PROGRESS
            .iter()
            .map(|s| format!("  {:<16} {:>3}% ({} problems)", s.skill, s.percent, s.problems)),
    );
    out.push("Recent activity:".to_string());
    out.extend(catalog::RECENT_ACTIVITY.iter().map(|a| {
        format!("  {:<12} {} ({}) - {}", a.when, a.problem, a.kind.label(), a.status)
    }));
    out
}
