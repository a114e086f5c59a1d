//! Click protocol entry point and per-user state machine
//!
//! ```text
//! Closed --open_menu--> Viewing(main)
//! Viewing(m) --submenu / back--> Viewing(m')
//! Viewing(m) --input flow--> AwaitingSubInput(f)
//! AwaitingSubInput(f) --confirm / cancel / invalid--> Closed
//! Viewing(m) --terminal command / error--> Closed
//! ```
//!
//! Every error is turned into a notice plus a close decision here; nothing
//! propagates past this boundary.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{MenuError, MenuResult};
use crate::services::{
    Action, CatalogService, CommandInterpreter, DecodedToken, EngineContext, Interpretation,
    ItemKeyCodec, PendingAction, RendererSet, Session, SessionRegistry,
};
use crate::types::{
    DispatchOutcome, FlowKind, FormResponse, Menu, MenuItem, Notice, SessionState, SurfaceKind,
    UserId, Viewer, MAIN_MENU_ID,
};

/// Dispatch coordinator
pub struct DispatchCoordinator {
    ctx: Arc<EngineContext>,
    catalog: Arc<CatalogService>,
    sessions: Arc<SessionRegistry>,
    renderers: RendererSet,
    interpreter: CommandInterpreter,
}

impl DispatchCoordinator {
    #[must_use]
    pub fn new(
        ctx: Arc<EngineContext>,
        catalog: Arc<CatalogService>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        let renderers = RendererSet::new(Arc::clone(&ctx.icons));
        let interpreter = CommandInterpreter::new(
            Arc::clone(&ctx.host),
            Arc::clone(&ctx.scheduler),
            Arc::clone(&ctx.settings),
        );
        Self {
            ctx,
            catalog,
            sessions,
            renderers,
            interpreter,
        }
    }

    /// Open the main menu, discarding any previous navigation history.
    pub async fn open_menu(&self, viewer: &Viewer, surface: SurfaceKind) -> DispatchOutcome {
        let session = self.sessions.entry(viewer.id, surface).await;
        let mut session = session.lock().await;
        let result = self.open_main(viewer, surface, &mut session).await;
        self.settle(viewer, &mut session, result).await
    }

    /// Handle a click carrying an activation token.
    ///
    /// Tokens outside our namespace belong to someone else and are ignored.
    pub async fn decode_and_dispatch(&self, viewer: &Viewer, token: &str) -> DispatchOutcome {
        self.dispatch(viewer, token, None).await
    }

    /// Handle a click that also returned a submitted form.
    pub async fn decode_and_dispatch_with_form(
        &self,
        viewer: &Viewer,
        token: &str,
        response: FormResponse,
    ) -> DispatchOutcome {
        self.dispatch(viewer, token, Some(response)).await
    }

    /// Handle a simple-form button press by its index.
    pub async fn dispatch_button(&self, viewer: &Viewer, index: usize) -> DispatchOutcome {
        let session = self.session_of(viewer).await;
        let mut session = session.lock().await;
        let result = match session.buttons.get(index).cloned() {
            Some(token) => self.route(viewer, &mut session, &token, None).await,
            None => Err(MenuError::Dispatch(format!("button index {index} out of range"))),
        };
        self.settle(viewer, &mut session, result).await
    }

    /// The user dismissed the current view or form.
    pub async fn cancel(&self, viewer: &Viewer) -> DispatchOutcome {
        if let Some(session) = self.sessions.get(&viewer.id).await {
            let mut session = session.lock().await;
            if let Some(pending) = &session.pending {
                log::debug!("{} cancelled {:?}", viewer.name, pending.flow);
            }
            session.close();
        }
        DispatchOutcome::close()
    }

    /// Drop everything kept for a user (disconnect).
    pub async fn forget(&self, user: &UserId) {
        if self.sessions.remove(user).await {
            log::debug!("Session of {user} dropped");
        }
    }

    /// Current state of a user; `Closed` when there is no session.
    pub async fn state(&self, user: &UserId) -> SessionState {
        match self.sessions.get(user).await {
            Some(session) => session.lock().await.state.clone(),
            None => SessionState::Closed,
        }
    }

    /// Navigation history of a user, bottom first.
    pub async fn stack(&self, user: &UserId) -> Vec<String> {
        match self.sessions.get(user).await {
            Some(session) => session.lock().await.stack.entries().to_vec(),
            None => vec![MAIN_MENU_ID.to_string()],
        }
    }

    async fn dispatch(
        &self,
        viewer: &Viewer,
        token: &str,
        response: Option<FormResponse>,
    ) -> DispatchOutcome {
        if !ItemKeyCodec::owns(token) {
            log::debug!("Ignoring foreign token {token}");
            return DispatchOutcome::keep_open();
        }
        let session = self.session_of(viewer).await;
        let mut session = session.lock().await;
        let result = self.route(viewer, &mut session, token, response).await;
        self.settle(viewer, &mut session, result).await
    }

    async fn session_of(&self, viewer: &Viewer) -> Arc<Mutex<Session>> {
        self.sessions.entry(viewer.id, SurfaceKind::RichDialog).await
    }

    /// Turn an error into a notice and close the view.
    async fn settle(
        &self,
        viewer: &Viewer,
        session: &mut Session,
        result: MenuResult<DispatchOutcome>,
    ) -> DispatchOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Dispatch for {} failed: {e}", viewer.name);
                } else {
                    log::error!("Dispatch for {} failed: {e}", viewer.name);
                }
                self.ctx
                    .host
                    .send_notice(&viewer.id, Notice::error(e.user_message()))
                    .await;
                session.close();
                DispatchOutcome::close()
            }
        }
    }

    async fn open_main(
        &self,
        viewer: &Viewer,
        surface: SurfaceKind,
        session: &mut Session,
    ) -> MenuResult<DispatchOutcome> {
        if let Some(permission) = &self.ctx.settings.use_permission {
            self.ctx.require_permission(&viewer.id, permission).await?;
        }
        session.surface = surface;
        session.pending = None;
        session.stack.reset();
        self.show(viewer, session, MAIN_MENU_ID).await?;
        Ok(DispatchOutcome::keep_open())
    }

    async fn route(
        &self,
        viewer: &Viewer,
        session: &mut Session,
        token: &str,
        response: Option<FormResponse>,
    ) -> MenuResult<DispatchOutcome> {
        match ItemKeyCodec::decode(token)? {
            DecodedToken::Item { menu_id, item_id } => {
                self.activate(viewer, session, &menu_id, &item_id).await
            }
            DecodedToken::Confirm(flow) => {
                self.confirm(viewer, session, flow, &response.unwrap_or_default())
                    .await
            }
        }
    }

    async fn activate(
        &self,
        viewer: &Viewer,
        session: &mut Session,
        menu_id: &str,
        item_id: &str,
    ) -> MenuResult<DispatchOutcome> {
        // Always the current snapshot: a reload since the render is visible here
        let catalog = self.catalog.snapshot();
        let item = catalog
            .lookup(menu_id)?
            .item(item_id)
            .ok_or_else(|| MenuError::ItemNotFound {
                menu_id: menu_id.to_string(),
                item_id: item_id.to_string(),
            })?;
        if let Some(permission) = &item.permission {
            self.ctx.require_permission(&viewer.id, permission).await?;
        }
        let permission = item.permission.clone();
        let action = Action::classify_item(item);
        log::debug!("{} activated {menu_id}/{item_id}: {action:?}", viewer.name);

        match self.interpreter.execute(viewer, action).await? {
            Interpretation::Back => {
                let parent = session.stack.pop_to_previous().to_string();
                self.show(viewer, session, &parent).await?;
                Ok(DispatchOutcome::keep_open())
            }
            Interpretation::Enter(submenu) => {
                // Render before pushing so an empty submenu leaves history untouched
                self.show(viewer, session, &submenu).await?;
                session.stack.push(submenu);
                Ok(DispatchOutcome::keep_open())
            }
            Interpretation::AwaitInput(form) => {
                let flow = form.flow;
                session.pending = Some(PendingAction {
                    flow,
                    menu_id: menu_id.to_string(),
                    item_id: item_id.to_string(),
                    permission,
                });
                session.state = SessionState::AwaitingSubInput(flow);
                self.ctx.presenter.show_form(&viewer.id, form).await;
                Ok(DispatchOutcome::keep_open())
            }
            Interpretation::Done => {
                session.close();
                Ok(DispatchOutcome::close())
            }
        }
    }

    async fn confirm(
        &self,
        viewer: &Viewer,
        session: &mut Session,
        flow: FlowKind,
        response: &FormResponse,
    ) -> MenuResult<DispatchOutcome> {
        let pending = match &session.pending {
            Some(pending) if pending.flow == flow => pending.clone(),
            _ => return Err(MenuError::NoPendingFlow(flow.confirm_key().to_string())),
        };
        if let Some(permission) = &pending.permission {
            self.ctx.require_permission(&viewer.id, permission).await?;
        }

        match self.interpreter.submit_flow(viewer, flow, response).await {
            Ok(_) => {
                session.close();
                Ok(DispatchOutcome::close())
            }
            Err(MenuError::Validation(message)) if flow.retries_on_invalid() => {
                log::debug!("{} resubmits {flow:?}: {message}", viewer.name);
                self.ctx
                    .host
                    .send_notice(&viewer.id, Notice::error(message))
                    .await;
                Ok(DispatchOutcome::keep_open())
            }
            Err(e) => Err(e),
        }
    }

    /// Render a menu for the viewer and make it the current view.
    async fn show(&self, viewer: &Viewer, session: &mut Session, menu_id: &str) -> MenuResult<()> {
        let catalog = self.catalog.snapshot();
        let menu = catalog.lookup(menu_id)?;
        let visible = self.visible_items(&viewer.id, menu).await;
        let rendered = self
            .renderers
            .for_surface(session.surface)
            .render(menu, &visible)?;

        session.buttons = visible
            .iter()
            .map(|item| ItemKeyCodec::encode(&menu.id, &item.id))
            .collect();
        session.state = SessionState::Viewing(menu.id.clone());
        // A menu view replaces any open form
        session.pending = None;
        self.ctx.presenter.show_menu(&viewer.id, rendered).await;
        Ok(())
    }

    async fn visible_items<'a>(&self, user: &UserId, menu: &'a Menu) -> Vec<&'a MenuItem> {
        let mut granted = HashSet::new();
        for permission in menu.items.iter().filter_map(|i| i.permission.as_deref()) {
            if !granted.contains(permission) && self.ctx.host.has_permission(user, permission).await
            {
                granted.insert(permission);
            }
        }
        menu.items
            .iter()
            .filter(|item| item.is_visible_with(|p| granted.contains(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        main_document, submenu_document, test_engine, InMemoryCatalogSource, TestEngine,
    };
    use crate::traits::{ScheduledTask, SourceDocument};
    use crate::types::{ActivationRef, NoticeKind};

    const VIP: &str = "menu.vip";

    async fn engine() -> TestEngine {
        let source = InMemoryCatalogSource::new(main_document(), vec![submenu_document()]);
        let engine = test_engine(source);
        engine.catalog.reload().await.unwrap();
        engine
    }

    fn alice(engine: &TestEngine) -> Viewer {
        engine.host.grant_default(&engine.viewer.id);
        engine.viewer.clone()
    }

    fn token(menu: &str, item: &str) -> String {
        ItemKeyCodec::encode(menu, item)
    }

    #[tokio::test]
    async fn open_shows_main_and_resets_history() {
        let engine = engine().await;
        let viewer = alice(&engine);

        let outcome = engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        assert!(!outcome.close);
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Viewing("main".to_string())
        );
        assert_eq!(engine.presenter.menus().await.len(), 1);

        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "shop"))
            .await;
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        assert_eq!(engine.coordinator.stack(&viewer.id).await, vec!["main"]);
    }

    #[tokio::test]
    async fn open_requires_use_permission() {
        let engine = engine().await;
        let viewer = engine.viewer.clone();

        let outcome = engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        assert!(outcome.close);
        assert!(engine.presenter.menus().await.is_empty());
        let notices = engine.host.notices_for(&viewer.id).await;
        assert_eq!(notices[0].kind, NoticeKind::Error);
    }

    // Permission-filtered render, then a click on the now-forbidden item from a stale view
    #[tokio::test]
    async fn hides_guarded_items_and_rejects_stale_clicks() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine.host.grant(&viewer.id, VIP);

        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        let with_vip = engine.presenter.last_menu().await.unwrap();
        assert!(with_vip
            .elements
            .iter()
            .any(|e| e.activation == ActivationRef::Token(token("main", "vip_lounge"))));

        engine.host.revoke(&viewer.id, VIP);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        let without_vip = engine.presenter.last_menu().await.unwrap();
        assert_eq!(without_vip.elements.len(), with_vip.elements.len() - 1);

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "vip_lounge"))
            .await;
        assert!(outcome.close);
        assert!(engine.scheduler.scheduled().is_empty());
        let notices = engine.host.notices_for(&viewer.id).await;
        assert_eq!(
            notices.last().unwrap().text,
            MenuError::PermissionDenied(VIP.to_string()).user_message()
        );
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Closed
        );
    }

    // Open main, enter a submenu, go back
    #[tokio::test]
    async fn submenu_round_trip() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "shop"))
            .await;
        assert!(!outcome.close);
        assert_eq!(
            engine.coordinator.stack(&viewer.id).await,
            vec!["main", "shop"]
        );
        assert_eq!(engine.presenter.last_menu().await.unwrap().menu_id, "shop");

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("shop", "back"))
            .await;
        assert!(!outcome.close);
        assert_eq!(engine.coordinator.stack(&viewer.id).await, vec!["main"]);
        assert_eq!(engine.presenter.last_menu().await.unwrap().menu_id, "main");
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Viewing("main".to_string())
        );
    }

    #[tokio::test]
    async fn back_on_main_stays_on_main() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("shop", "back"))
            .await;
        assert!(!outcome.close);
        assert_eq!(engine.coordinator.stack(&viewer.id).await, vec!["main"]);
    }

    #[tokio::test]
    async fn terminal_command_closes_and_is_scheduled() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "spawn"))
            .await;
        assert!(outcome.close);
        assert_eq!(
            engine.scheduler.scheduled(),
            vec![(
                0,
                ScheduledTask::UserCommand {
                    user: viewer.id,
                    command: "spawn".to_string(),
                }
            )]
        );
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Closed
        );
    }

    // Admin form with a missing required field: nothing runs, the view closes
    #[tokio::test]
    async fn admin_flow_validation_failure_closes() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "ban"))
            .await;
        assert!(!outcome.close);
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::AwaitingSubInput(FlowKind::Ban)
        );
        assert_eq!(engine.presenter.forms().await[0].flow, FlowKind::Ban);

        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &ItemKeyCodec::confirm_token(FlowKind::Ban),
                FormResponse::new().with_text("reason", "grief"),
            )
            .await;
        assert!(outcome.close);
        assert!(engine.scheduler.scheduled().is_empty());
        let notices = engine.host.notices_for(&viewer.id).await;
        assert_eq!(notices.last().unwrap().text, "Player name is required");
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Closed
        );
    }

    #[tokio::test]
    async fn admin_flow_confirm_schedules_commands() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "ban"))
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &ItemKeyCodec::confirm_token(FlowKind::Ban),
                FormResponse::new().with_text("player", "Griefer"),
            )
            .await;
        assert!(outcome.close);
        assert_eq!(
            engine.scheduler.commands(),
            vec!["ban Griefer No reason given"]
        );
    }

    #[tokio::test]
    async fn map_art_stays_open_on_invalid_input() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "mapart"))
            .await;

        let confirm = ItemKeyCodec::confirm_token(FlowKind::MapArt);
        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(&viewer, &confirm, FormResponse::new())
            .await;
        assert!(!outcome.close);
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::AwaitingSubInput(FlowKind::MapArt)
        );

        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &confirm,
                FormResponse::new().with_text("url", "https://example.org/a.png"),
            )
            .await;
        assert!(outcome.close);
        assert_eq!(
            engine.scheduler.commands(),
            vec!["tomap https://example.org/a.png resize 1 1"]
        );
    }

    #[tokio::test]
    async fn confirm_without_open_form_is_rejected() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &ItemKeyCodec::confirm_token(FlowKind::Promote),
                FormResponse::new().with_text("player", "Steve"),
            )
            .await;
        assert!(outcome.close);
        assert!(engine.scheduler.scheduled().is_empty());
    }

    #[tokio::test]
    async fn confirm_rechecks_item_permission() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "ban"))
            .await;

        engine.host.revoke(&viewer.id, "menu.admin");
        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &ItemKeyCodec::confirm_token(FlowKind::Ban),
                FormResponse::new().with_text("player", "Griefer"),
            )
            .await;
        assert!(outcome.close);
        assert!(engine.scheduler.scheduled().is_empty());
    }

    #[tokio::test]
    async fn cancel_discards_pending_flow() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "ban"))
            .await;

        assert!(engine.coordinator.cancel(&viewer).await.close);
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Closed
        );
        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &ItemKeyCodec::confirm_token(FlowKind::Ban),
                FormResponse::new().with_text("player", "Griefer"),
            )
            .await;
        assert!(outcome.close);
        assert!(engine.scheduler.scheduled().is_empty());
    }

    #[tokio::test]
    async fn foreign_tokens_are_ignored() {
        let engine = engine().await;
        let viewer = alice(&engine);
        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, "otherplugin:menu_main_spawn")
            .await;
        assert!(!outcome.close);
        assert!(engine.host.notices_for(&viewer.id).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_token_gets_generic_message() {
        let engine = engine().await;
        let viewer = alice(&engine);
        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, "avantgardemenu:menu_garbage")
            .await;
        assert!(outcome.close);
        let notices = engine.host.notices_for(&viewer.id).await;
        assert_eq!(
            notices[0].text,
            MenuError::MenuNotFound(String::new()).user_message()
        );
    }

    #[tokio::test]
    async fn reload_between_render_and_click_is_observed() {
        let source = InMemoryCatalogSource::new(main_document(), vec![submenu_document()]);
        let engine = test_engine(source);
        engine.catalog.reload().await.unwrap();
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        engine
            .source
            .set_main(SourceDocument::new(
                "main",
                "[menu]\n[menu.items.spawn]\ncommand = \"[console]spawn %player%\"\n",
            ))
            .await;
        engine.catalog.reload().await.unwrap();

        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "spawn"))
            .await;
        assert_eq!(engine.scheduler.commands(), vec!["spawn Alice"]);
    }

    #[tokio::test]
    async fn empty_submenu_is_not_pushed() {
        let source = InMemoryCatalogSource::new(
            main_document(),
            vec![SourceDocument::new(
                "shop",
                "[menu]\n[menu.items.secret]\npermission = \"nobody\"\n",
            )],
        );
        let engine = test_engine(source);
        engine.catalog.reload().await.unwrap();
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "shop"))
            .await;
        assert!(outcome.close);
        assert_eq!(engine.coordinator.stack(&viewer.id).await, vec!["main"]);
        let notices = engine.host.notices_for(&viewer.id).await;
        assert_eq!(
            notices.last().unwrap().text,
            MenuError::NothingAvailable(String::new()).user_message()
        );
    }

    #[tokio::test]
    async fn simple_form_buttons_map_to_visible_items() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::SimpleForm)
            .await;
        let rendered = engine.presenter.last_menu().await.unwrap();
        assert_eq!(rendered.surface, SurfaceKind::SimpleForm);
        assert_eq!(rendered.elements[0].activation, ActivationRef::Index(0));

        // First visible item of the main document is `spawn`
        let outcome = engine.coordinator.dispatch_button(&viewer, 0).await;
        assert!(outcome.close);
        assert_eq!(engine.scheduler.commands(), vec!["spawn"]);

        let outcome = engine.coordinator.dispatch_button(&viewer, 99).await;
        assert!(outcome.close);
    }

    #[tokio::test]
    async fn toggle_closes_view() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "nightvision"))
            .await;
        assert!(outcome.close);
        assert_eq!(engine.scheduler.scheduled().len(), 1);
    }

    #[tokio::test]
    async fn navigating_away_drops_pending_flow() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "ban"))
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("shop", "back"))
            .await;
        assert!(!outcome.close);
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Viewing("main".to_string())
        );

        let outcome = engine
            .coordinator
            .decode_and_dispatch_with_form(
                &viewer,
                &ItemKeyCodec::confirm_token(FlowKind::Ban),
                FormResponse::new().with_text("player", "X"),
            )
            .await;
        assert!(outcome.close);
        assert!(engine.scheduler.scheduled().is_empty());
    }

    #[tokio::test]
    async fn submenu_beats_command_on_the_same_item() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .source
            .set_main(SourceDocument::new(
                "main",
                "[menu]\n[menu.items.both]\ncommand = \"[console]say should-not-run\"\nsubmenu = \"shop\"\n",
            ))
            .await;
        engine.catalog.reload().await.unwrap();
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "both"))
            .await;
        assert!(!outcome.close);
        assert_eq!(
            engine.coordinator.stack(&viewer.id).await,
            vec!["main", "shop"]
        );
        assert!(engine.scheduler.scheduled().is_empty());
    }

    // Item with neither command nor submenu
    #[tokio::test]
    async fn inert_item_closes_quietly() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .source
            .set_main(SourceDocument::new(
                "main",
                "[menu]\n[menu.items.divider]\ntitle = \"----\"\n",
            ))
            .await;
        engine.catalog.reload().await.unwrap();
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;

        let outcome = engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "divider"))
            .await;
        assert!(outcome.close);
        assert!(engine.host.notices_for(&viewer.id).await.is_empty());
        assert!(engine.scheduler.scheduled().is_empty());
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Closed
        );
    }

    // Navigation keeps the view; every other action closes it
    #[tokio::test]
    async fn only_navigation_and_forms_keep_view_open() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .source
            .set_main(SourceDocument::new(
                "main",
                r#"
[menu]
[menu.items.shop]
submenu = "shop"
[menu.items.promote]
command = "[special]admin_promote"
[menu.items.site]
command = "[special]open_url:https://example.org"
[menu.items.say]
command = "[console]say hi"
[menu.items.spawn]
command = "spawn"
[menu.items.nightvision]
command = "[special]nightvision_toggle"
"#,
            ))
            .await;
        engine.catalog.reload().await.unwrap();

        let cases = [
            ("main", "shop", false),
            ("shop", "back", false),
            ("main", "promote", false),
            ("main", "site", true),
            ("main", "say", true),
            ("main", "spawn", true),
            ("main", "nightvision", true),
        ];
        for (menu, item, closes) in cases {
            if menu == "main" {
                engine
                    .coordinator
                    .open_menu(&viewer, SurfaceKind::RichDialog)
                    .await;
            }
            let outcome = engine
                .coordinator
                .decode_and_dispatch(&viewer, &token(menu, item))
                .await;
            assert_eq!(outcome.close, closes, "{menu}/{item}");
        }
    }

    #[tokio::test]
    async fn forget_drops_session() {
        let engine = engine().await;
        let viewer = alice(&engine);
        engine
            .coordinator
            .open_menu(&viewer, SurfaceKind::RichDialog)
            .await;
        engine
            .coordinator
            .decode_and_dispatch(&viewer, &token("main", "shop"))
            .await;

        engine.coordinator.forget(&viewer.id).await;
        assert_eq!(
            engine.coordinator.state(&viewer.id).await,
            SessionState::Closed
        );
        assert_eq!(engine.coordinator.stack(&viewer.id).await, vec!["main"]);
    }
}
