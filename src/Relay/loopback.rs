//! An in-process connector/dispatcher link.
//!
//! Two broadcast queues carry the traffic: one upstream (dispatcher to
//! connector) and one downstream. Each end holds an [`Exchange`] over the two
//! queues, so both consumers exist before either side sends anything.
//!
//! Closing either end hangs up on the peer: its next (or current) blocking
//! read returns `RelayError::Closed`. [`LoopbackCloser`] closes an end from
//! another thread while `accept` or `connect` holds it mutably.

use super::{ConnectorRelay, Dispatcher, DispatcherRelay, RelayError};
use crate::Broadcast::{CancelHandle, Exchange, Producer, Queue, QueueBuilder};
use crate::Core::trace::{debug, info, warn};
use crate::Domain::{ClientMessage, ConfirmationMessage, RegistrationMessage, ServerMessage, User};
use crate::Registry::{CommandList, ReadOnlyCommands, ReadOnlyUsers, UserDirectory};

#[derive(Debug, Clone)]
enum Upstream {
    Register(RegistrationMessage),
    Client(ClientMessage),
    Hangup,
}

#[derive(Debug, Clone)]
enum Downstream {
    Confirm(ConfirmationMessage),
    Server(ServerMessage),
    Hangup,
}

struct Session {
    bot_user: User,
    online_users: ReadOnlyUsers,
    trigger: String,
}

/// Connector end of a loopback link.
pub struct LoopbackConnectorRelay {
    exchange: Exchange<Downstream, Upstream>,
    downstream: Queue<Downstream>,
    session: Option<Session>,
}

/// Bot end of a loopback link.
pub struct LoopbackDispatcherRelay {
    exchange: Exchange<Upstream, Downstream>,
    connected: bool,
}

/// The connector's handle on the dispatcher that registered through a
/// loopback link.
pub struct LoopbackDispatcher {
    producer: Producer<Downstream>,
    commands: ReadOnlyCommands,
}

/// Closes one end of a loopback link from any thread.
pub struct LoopbackCloser(CloserEnd);

enum CloserEnd {
    Connector {
        own: CancelHandle<Upstream>,
        peer: Producer<Downstream>,
    },
    Dispatcher {
        own: CancelHandle<Downstream>,
        peer: Producer<Upstream>,
    },
}

impl LoopbackCloser {
    /// Stops the end's receiving side and hangs up on the peer.
    pub fn close(&self) {
        match &self.0 {
            CloserEnd::Connector { own, peer } => {
                own.cancel();
                let _ = peer.produce(Downstream::Hangup);
            }
            CloserEnd::Dispatcher { own, peer } => {
                own.cancel();
                let _ = peer.produce(Upstream::Hangup);
            }
        }
    }
}

/// Creates both ends of a fresh loopback link.
pub fn pair() -> Result<(LoopbackConnectorRelay, LoopbackDispatcherRelay), RelayError> {
    let upstream: Queue<Upstream> = QueueBuilder::new().with_name("loopback-upstream").build();
    let downstream: Queue<Downstream> = QueueBuilder::new().with_name("loopback-downstream").build();
    let (connector_end, dispatcher_end) = Exchange::pair(&downstream, &upstream)?;

    let connector = LoopbackConnectorRelay {
        exchange: connector_end,
        downstream,
        session: None,
    };
    let dispatcher = LoopbackDispatcherRelay {
        exchange: dispatcher_end,
        connected: false,
    };
    Ok((connector, dispatcher))
}

impl LoopbackConnectorRelay {
    /// Stops receiving and hangs up on the dispatcher end. A blocked `recv`
    /// returns `RelayError::Closed`, as does the peer's `connect` or `recv`.
    pub fn close(&self) {
        self.exchange.cancel();
        let _ = self.exchange.produce(Downstream::Hangup);
    }

    /// A handle that closes this end while `accept` is blocked on it.
    pub fn closer(&self) -> Result<LoopbackCloser, RelayError> {
        Ok(LoopbackCloser(CloserEnd::Connector {
            own: self.exchange.consumer().cancel_handle(),
            peer: self.downstream.new_producer()?,
        }))
    }

    fn hung_up(&self) -> RelayError {
        debug!("loopback dispatcher hung up");
        self.exchange.cancel();
        RelayError::Closed
    }
}

impl ConnectorRelay for LoopbackConnectorRelay {
    fn start(&mut self, bot_user: User, online_users: ReadOnlyUsers, trigger: &str) -> Result<(), RelayError> {
        info!(bot = %bot_user.nick, trigger, "loopback connector started");
        self.session = Some(Session {
            bot_user,
            online_users,
            trigger: trigger.to_string(),
        });
        Ok(())
    }

    fn accept(&mut self) -> Result<Box<dyn Dispatcher>, RelayError> {
        let session = self.session.as_ref().ok_or(RelayError::NotStarted)?;
        match self.exchange.consume()? {
            Upstream::Register(registration) => {
                let confirmation = ConfirmationMessage::new(
                    session.bot_user.clone(),
                    session.trigger.clone(),
                    session.online_users.all(),
                );
                self.exchange.produce(Downstream::Confirm(confirmation))?;
                info!(commands = registration.commands.len(), "loopback dispatcher accepted");
                Ok(Box::new(LoopbackDispatcher {
                    producer: self.downstream.new_producer()?,
                    commands: CommandList::from_commands(registration.commands).into_read_only(),
                }))
            }
            Upstream::Client(_) => {
                warn!("client message before registration");
                Err(RelayError::Protocol("client message before registration"))
            }
            Upstream::Hangup => Err(self.hung_up()),
        }
    }

    fn recv(&self) -> Result<ClientMessage, RelayError> {
        match self.exchange.consume()? {
            Upstream::Client(message) => Ok(message),
            Upstream::Register(_) => {
                warn!("registration outside accept");
                Err(RelayError::Protocol("registration outside accept"))
            }
            Upstream::Hangup => Err(self.hung_up()),
        }
    }

    fn done(&self) -> bool {
        self.exchange.is_cancelled()
    }
}

impl Dispatcher for LoopbackDispatcher {
    fn dispatch(&self, message: ServerMessage) -> Result<(), RelayError> {
        self.producer.produce(Downstream::Server(message))?;
        Ok(())
    }

    fn commands(&self) -> ReadOnlyCommands {
        self.commands.clone()
    }

    /// True once the dispatcher relay has closed its receiving side.
    fn done(&self) -> bool {
        self.producer.queue().consumer_count() == 0
    }
}

impl LoopbackDispatcherRelay {
    /// Stops receiving and hangs up on the connector end. A blocked `recv`
    /// returns `RelayError::Closed`, as does the peer's `accept` or `recv`.
    pub fn close(&self) {
        self.exchange.cancel();
        let _ = self.exchange.produce(Upstream::Hangup);
    }

    /// A handle that closes this end while `connect` is blocked on it.
    pub fn closer(&self) -> Result<LoopbackCloser, RelayError> {
        Ok(LoopbackCloser(CloserEnd::Dispatcher {
            own: self.exchange.consumer().cancel_handle(),
            peer: self.exchange.producer().queue().new_producer()?,
        }))
    }

    fn hung_up(&self) -> RelayError {
        debug!("loopback connector hung up");
        self.exchange.cancel();
        RelayError::Closed
    }
}

impl DispatcherRelay for LoopbackDispatcherRelay {
    fn connect(&mut self, registration: RegistrationMessage) -> Result<ConfirmationMessage, RelayError> {
        self.exchange.produce(Upstream::Register(registration))?;
        match self.exchange.consume()? {
            Downstream::Confirm(confirmation) => {
                self.connected = true;
                Ok(confirmation)
            }
            Downstream::Server(_) => Err(RelayError::Protocol("server message before confirmation")),
            Downstream::Hangup => Err(self.hung_up()),
        }
    }

    fn send(&self, message: ClientMessage) -> Result<(), RelayError> {
        if !self.connected {
            return Err(RelayError::NotStarted);
        }
        self.exchange.produce(Upstream::Client(message))?;
        Ok(())
    }

    fn recv(&self) -> Result<ServerMessage, RelayError> {
        match self.exchange.consume()? {
            Downstream::Server(message) => Ok(message),
            Downstream::Confirm(_) => Err(RelayError::Protocol("unexpected confirmation")),
            Downstream::Hangup => Err(self.hung_up()),
        }
    }

    fn done(&self) -> bool {
        self.exchange.is_cancelled()
    }
}
