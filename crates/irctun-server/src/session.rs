//! Per-connection coordinator.
//!
//! A session owns one [`App`] behind a single async lock and runs two loops
//! against it: the client loop (decoded telnet input) and the upstream loop
//! (IRC lines). Each event is handled under the lock, a [`View`] is copied
//! out, and the lock is released before anything is written. Each socket has
//! its own [`TimedWriter`], so a stalled client never delays IRC processing
//! and the reverse.
//!
//! # Shutdown
//!
//! Either loop ending (EOF, error, timeout, `/quit`) flips the shared stop
//! signal. The other loop observes it at its next await point. The session
//! then sends a best-effort `QUIT`, closes both write paths, and waits for
//! the upstream loop's completion signal before returning.

use std::{
    collections::VecDeque,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

use irctun_app::{App, AppAction, AppEvent, DISCONNECT_MESSAGE, Environment};
use irctun_proto::{Decoded, IrcCommand, Message, telnet::DO_NAWS};
use irctun_tui::{View, clear_prompt, clear_screen, flash_input, render, size_query, splash};
use tokio::{
    io::{AsyncRead, AsyncWrite, ReadHalf, WriteHalf},
    net::tcp::{OwnedReadHalf, OwnedWriteHalf},
    sync::{Mutex, oneshot, watch},
    time::{sleep, timeout},
};

use crate::{
    GatewayConfig, GatewayError,
    client::ClientReader,
    upstream::{self, UpstreamReader},
    writer::TimedWriter,
};

/// One client connection and its IRC server connection.
pub struct Session<S, E> {
    stream: S,
    config: Arc<GatewayConfig>,
    env: E,
}

impl<S, E> Session<S, E>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
    E: Environment,
{
    /// Prepare a session for an accepted client stream.
    pub fn new(stream: S, config: Arc<GatewayConfig>, env: E) -> Self {
        Self { stream, config, env }
    }

    /// Drive the session to completion.
    ///
    /// Returns `Ok` when the user quits or hangs up, and the terminating
    /// error otherwise.
    pub async fn run(self) -> Result<(), GatewayError> {
        let Self { stream, config, env } = self;
        let (read_half, write_half) = tokio::io::split(stream);

        let app = App::new(env, config.upstream.clone(), config.channel.clone());
        let link = Arc::new(Link::new(app, write_half, Arc::clone(&config)));
        let mut reader = ClientReader::new(read_half, config.idle_timeout);

        link.client.write_all(&DO_NAWS).await?;
        link.client.write_all(&size_query()?).await?;

        let mut held = VecDeque::new();
        link.probe(&mut reader, &mut held).await?;
        if !link.geometry_known().await {
            link.client.write_all(&splash()?).await?;
            link.client.write_all(&size_query()?).await?;
            link.await_enter(&mut reader, &mut held).await?;
        }

        link.dispatch(AppEvent::Connecting).await?;
        let stream = match upstream::connect(&config.upstream, config.connect_timeout).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("upstream connect failed: {e}");
                link.dispatch(AppEvent::ConnectFailed { reason: e.to_string() }).await?;
                sleep(config.failure_grace).await;
                link.client.shutdown().await;
                return Err(e);
            },
        };
        tracing::info!(upstream = %config.upstream, "connected");

        let (up_read, up_write) = stream.into_split();
        link.attach_upstream(up_write);
        link.dispatch(AppEvent::Connected).await?;
        for line in held {
            link.dispatch(AppEvent::Line(line)).await?;
        }

        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(upstream_loop(Arc::clone(&link), UpstreamReader::new(up_read), done_tx));

        let result = client_loop(&link, &mut reader).await;
        link.stop();
        link.close().await;
        if done_rx.await.is_err() {
            tracing::debug!("upstream loop dropped its completion signal");
        }

        result
    }
}

/// State shared by both loops of one session.
struct Link<E: Environment, W> {
    app: Mutex<App<E>>,
    client: TimedWriter<W>,
    upstream: OnceLock<TimedWriter<OwnedWriteHalf>>,
    stop: watch::Sender<bool>,
    quit_sent: AtomicBool,
    config: Arc<GatewayConfig>,
}

impl<E, W> Link<E, W>
where
    E: Environment,
    W: AsyncWrite + Unpin + Send,
{
    fn new(app: App<E>, client: W, config: Arc<GatewayConfig>) -> Self {
        let (stop, _) = watch::channel(false);
        Self {
            app: Mutex::new(app),
            client: TimedWriter::new(client, config.write_timeout, "client write"),
            upstream: OnceLock::new(),
            stop,
            quit_sent: AtomicBool::new(false),
            config,
        }
    }

    fn attach_upstream(&self, write: OwnedWriteHalf) {
        let writer = TimedWriter::new(write, self.config.write_timeout, "upstream write");
        if self.upstream.set(writer).is_err() {
            tracing::warn!("upstream already attached");
        }
    }

    fn stop(&self) {
        self.stop.send_replace(true);
    }

    fn stopped(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.stop.subscribe();
        async move {
            loop {
                let done = *rx.borrow_and_update();
                if done || rx.changed().await.is_err() {
                    return;
                }
            }
        }
    }

    async fn geometry_known(&self) -> bool {
        self.app.lock().await.state().geometry_known()
    }

    /// Wait briefly for a NAWS or cursor report. Lines typed meanwhile are
    /// kept for later.
    async fn probe<R: AsyncRead + Unpin>(
        &self,
        reader: &mut ClientReader<R>,
        held: &mut VecDeque<String>,
    ) -> Result<(), GatewayError> {
        let found = timeout(self.config.probe_timeout, async {
            loop {
                match reader.next().await? {
                    Decoded::Resize(geometry) => return Ok::<_, GatewayError>(geometry),
                    Decoded::Line(line) => held.push_back(line),
                }
            }
        })
        .await;

        match found {
            Ok(geometry) => self.dispatch(AppEvent::Resize(geometry?)).await,
            Err(_) => {
                tracing::debug!("no size report within probe window");
                Ok(())
            },
        }
    }

    /// Consume one line. Line-buffered clients hold the cursor report until
    /// Enter; the decoder yields that report before the line itself.
    async fn await_enter<R: AsyncRead + Unpin>(
        &self,
        reader: &mut ClientReader<R>,
        held: &mut VecDeque<String>,
    ) -> Result<(), GatewayError> {
        if held.pop_front().is_some() {
            return Ok(());
        }
        loop {
            match reader.next().await? {
                Decoded::Resize(geometry) => self.dispatch(AppEvent::Resize(geometry)).await?,
                Decoded::Line(_) => return Ok(()),
            }
        }
    }

    /// Apply one event and perform the resulting actions.
    async fn dispatch(&self, event: AppEvent) -> Result<(), GatewayError> {
        let (actions, view) = {
            let mut app = self.app.lock().await;
            let actions = app.handle(event);
            let view = actions.iter().any(needs_view).then(|| View::capture(app.state()));
            (actions, view)
        };

        for action in actions {
            self.execute(action, view.as_ref()).await?;
        }
        Ok(())
    }

    async fn execute(&self, action: AppAction, view: Option<&View>) -> Result<(), GatewayError> {
        match (action, view) {
            (AppAction::Render, Some(view)) => self.client.write_all(&render(view)?).await,
            (AppAction::ClearPrompt, Some(view)) => {
                self.client.write_all(&clear_prompt(view.height)?).await
            },
            (AppAction::FlashInput { text }, Some(view)) => {
                self.client.write_all(&flash_input(view, &text)?).await
            },
            (AppAction::ClearScreen, _) => self.client.write_all(&clear_screen()?).await,
            (AppAction::QuerySize, _) => self.client.write_all(&size_query()?).await,
            (AppAction::Send(command), _) => self.send_upstream(&command).await,
            (AppAction::Quit, _) => {
                sleep(self.config.quit_grace).await;
                self.stop();
                Ok(())
            },
            (AppAction::Render | AppAction::ClearPrompt | AppAction::FlashInput { .. }, None) => {
                Ok(())
            },
        }
    }

    async fn send_upstream(&self, command: &IrcCommand) -> Result<(), GatewayError> {
        let Some(upstream) = self.upstream.get() else {
            tracing::debug!(%command, "not connected, dropping");
            return Ok(());
        };
        if matches!(command, IrcCommand::Quit(_)) {
            self.quit_sent.store(true, Ordering::Release);
        }
        tracing::debug!(%command, "-> upstream");
        upstream.write_all(command.to_wire().as_bytes()).await
    }

    /// Best-effort `QUIT` unless one was already sent, then close both
    /// write paths.
    async fn close(&self) {
        if !self.quit_sent.load(Ordering::Acquire) {
            let quit = IrcCommand::Quit(DISCONNECT_MESSAGE.to_string());
            if let Err(e) = self.send_upstream(&quit).await {
                tracing::warn!("failed to send QUIT: {e}");
            }
        }
        if let Some(upstream) = self.upstream.get() {
            upstream.shutdown().await;
        }
        self.client.shutdown().await;
    }
}

fn needs_view(action: &AppAction) -> bool {
    matches!(action, AppAction::Render | AppAction::ClearPrompt | AppAction::FlashInput { .. })
}

type ClientLink<S, E> = Link<E, WriteHalf<S>>;

async fn client_loop<S, E>(
    link: &ClientLink<S, E>,
    reader: &mut ClientReader<ReadHalf<S>>,
) -> Result<(), GatewayError>
where
    S: AsyncRead + AsyncWrite + Send,
    E: Environment,
{
    let stopped = link.stopped();
    tokio::pin!(stopped);

    loop {
        let item = tokio::select! {
            () = &mut stopped => return Ok(()),
            item = reader.next() => item,
        };
        let event = match item {
            Ok(Decoded::Resize(geometry)) => AppEvent::Resize(geometry),
            Ok(Decoded::Line(line)) => {
                tracing::debug!(%line, "<- client");
                AppEvent::Line(line)
            },
            Err(GatewayError::ClientClosed) => {
                tracing::info!("client closed");
                return Ok(());
            },
            Err(e) => return Err(e),
        };
        link.dispatch(event).await?;
    }
}

async fn upstream_loop<S, E>(
    link: Arc<ClientLink<S, E>>,
    mut reader: UpstreamReader<OwnedReadHalf>,
    done: oneshot::Sender<()>,
) where
    S: AsyncRead + AsyncWrite + Send,
    E: Environment,
{
    let stopped = link.stopped();
    tokio::pin!(stopped);

    let result = loop {
        let line = tokio::select! {
            () = &mut stopped => break Ok(()),
            line = reader.next_line() => line,
        };
        match line {
            Ok(line) if line.is_empty() => {},
            Ok(line) => {
                tracing::debug!(%line, "<- upstream");
                if let Err(e) = link.dispatch(AppEvent::Irc(Message::parse(&line))).await {
                    break Err(e);
                }
            },
            Err(e) => break Err(e),
        }
    };

    match result {
        Ok(()) => {},
        Err(GatewayError::UpstreamClosed) => tracing::info!("IRC server closed the connection"),
        Err(e) => tracing::warn!("upstream loop ended: {e}"),
    }
    link.stop();
    let _ = done.send(());
}
