// crates/zigbee-addr/src/resolver/main.rs
use super::cache::AddressCache;
use super::config::ResolverConfig;
use super::events::{Resolution, ResolveConfirm, ResolveFailure};
use super::queue::ResolutionQueue;
use super::state::{Exchange, ResolverState};
use crate::hal::{ResolverError, ZdpTransport};
use crate::types::{Address, AddressKind};
use crate::zdp::{
    AddrResponse, ExchangeOutcome, IeeeAddrRequest, NwkAddrRequest, RequestType, ZdpStatus,
};
use alloc::boxed::Box;
use log::{debug, info, warn};

/// Translates between short and extended addresses over ZDP, one exchange
/// at a time.
///
/// One instance per network interface. All methods are expected to be
/// called from the same event-processing context as the transport's
/// completions.
#[derive(Debug)]
pub struct AddressResolver {
    config: ResolverConfig,
    state: ResolverState,
    queue: ResolutionQueue,
    cache: AddressCache,
    /// Set exactly while in `IeeeAddrRequest` or `NwkAddrRequest`.
    outstanding: Option<Exchange>,
    /// Set exactly while in `Confirm`.
    pending_result: Option<Resolution>,
    next_tsn: u8,
}

impl AddressResolver {
    pub fn new(config: ResolverConfig) -> Result<Self, ResolverError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ResolverState::Idle,
            queue: ResolutionQueue::new(),
            cache: AddressCache::new(config.cache_capacity),
            outstanding: None,
            pending_result: None,
            next_tsn: 0,
        })
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ResolverState::Idle
    }

    /// Number of requests waiting for a result, including the queue head.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The exchange currently on the air, if any.
    pub fn outstanding(&self) -> Option<Exchange> {
        self.outstanding
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Number of pairs currently held in the cache.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn get_next_tsn(&mut self) -> u8 {
        self.next_tsn = self.next_tsn.wrapping_add(1);
        if self.next_tsn == 0 {
            self.next_tsn = 1;
        }
        self.next_tsn
    }

    /// Requests the `requested_kind` address of the device known by `known`.
    ///
    /// `callback` is invoked exactly once with the outcome. Usually that
    /// happens from a later `on_response` or `reset`. A cache hit completes
    /// it before this function returns.
    ///
    /// Fails synchronously, without queueing anything, if `known` is not a
    /// single-device address or if `requested_kind` is the kind `known`
    /// already is.
    pub fn resolve<T, F>(
        &mut self,
        known: Address,
        requested_kind: AddressKind,
        callback: F,
        transport: &mut T,
    ) -> Result<(), ResolverError>
    where
        T: ZdpTransport + ?Sized,
        F: FnOnce(ResolveConfirm) + 'static,
    {
        if !known.is_well_formed() {
            warn!("[ZDO-ADDR] Rejected resolve for {}: not a unicast address", known);
            return Err(ResolverError::InvalidAddress(known));
        }
        if requested_kind == known.kind() {
            warn!(
                "[ZDO-ADDR] Rejected resolve for {}: {:?} address already known",
                known, requested_kind
            );
            return Err(ResolverError::AlreadyResolved(requested_kind));
        }

        if let Some(pair) = self.cache.lookup(&known) {
            debug!("[ZDO-ADDR] Cache hit for {}: {}", known, pair);
            callback(ResolveConfirm {
                known,
                result: Ok(pair),
            });
            return Ok(());
        }

        let sequence = self.queue.push(known, requested_kind, Box::new(callback));
        debug!(
            "[ZDO-ADDR] Queued request #{} for {} ({} pending, state {:?})",
            sequence,
            known,
            self.queue.len(),
            self.state
        );

        if self.state == ResolverState::Idle {
            self.state = ResolverState::Begin;
            self.run(transport);
        }
        Ok(())
    }

    /// Feeds the completion of an exchange back into the state machine.
    ///
    /// Responses that arrive when nothing is outstanding, or whose TSN does
    /// not match the outstanding exchange, are logged and dropped.
    pub fn on_response<T>(&mut self, response: AddrResponse, transport: &mut T)
    where
        T: ZdpTransport + ?Sized,
    {
        let exchange = match self.outstanding {
            Some(exchange) if self.state.is_awaiting_response() => exchange,
            _ => {
                warn!(
                    "[ZDO-ADDR] Discarding stale response (TSN {}) in state {:?}",
                    response.tsn, self.state
                );
                return;
            }
        };
        if response.tsn != exchange.tsn {
            warn!(
                "[ZDO-ADDR] Discarding response with TSN {}, awaiting TSN {} for {}",
                response.tsn, exchange.tsn, exchange.queried
            );
            return;
        }

        self.outstanding = None;
        let queried = exchange.queried;
        let resolution = match response.outcome {
            ExchangeOutcome::Resolved(pair)
                if pair.contains(&queried)
                    && Address::Short(pair.short).is_well_formed()
                    && Address::Extended(pair.extended).is_well_formed() =>
            {
                Resolution::Resolved(pair)
            }
            ExchangeOutcome::Resolved(pair) => {
                warn!(
                    "[ZDO-ADDR] Response TSN {} carries {} which does not answer {}",
                    response.tsn, pair, queried
                );
                Resolution::Failed {
                    queried,
                    failure: ResolveFailure::InvalidResponse,
                }
            }
            ExchangeOutcome::Failed(ZdpStatus::Success) => {
                warn!(
                    "[ZDO-ADDR] Response TSN {} reported failure with a Success status",
                    response.tsn
                );
                Resolution::Failed {
                    queried,
                    failure: ResolveFailure::InvalidResponse,
                }
            }
            ExchangeOutcome::Failed(status) => Resolution::Failed {
                queried,
                failure: ResolveFailure::Status(status),
            },
            ExchangeOutcome::TimedOut => Resolution::Failed {
                queried,
                failure: ResolveFailure::Timeout,
            },
        };

        self.enter_confirm(resolution);
        self.run(transport);
    }

    /// Cancels everything. Call this when the device leaves the network.
    ///
    /// Every queued request receives `ResolveFailure::Cancelled` and the
    /// cache is cleared. A response to the exchange that was in flight
    /// will be discarded as stale.
    pub fn reset(&mut self) {
        let flushed = self.queue.drain_all();
        if let Some(exchange) = self.outstanding.take() {
            info!(
                "[ZDO-ADDR] Reset abandons exchange TSN {} for {}",
                exchange.tsn, exchange.queried
            );
        }
        self.pending_result = None;
        self.state = ResolverState::Idle;
        self.cache.clear();
        info!("[ZDO-ADDR] Reset: cancelling {} pending request(s)", flushed.len());

        for request in flushed {
            let known = request.known;
            request.deliver(ResolveConfirm {
                known,
                result: Err(ResolveFailure::Cancelled),
            });
        }
    }

    /// Drops any cached pair naming `addr`, e.g. after a leave indication.
    /// Returns the number of entries removed.
    pub fn forget(&mut self, addr: &Address) -> usize {
        let removed = self.cache.forget(addr);
        if removed > 0 {
            debug!("[ZDO-ADDR] Forgot {} cached pair(s) for {}", removed, addr);
        }
        removed
    }

    /// Runs transitional states until the machine settles in a state that
    /// waits for an external event.
    fn run<T>(&mut self, transport: &mut T)
    where
        T: ZdpTransport + ?Sized,
    {
        loop {
            match self.state {
                ResolverState::Begin => self.begin_exchange(transport),
                ResolverState::Confirm => self.confirm(),
                ResolverState::Idle
                | ResolverState::IeeeAddrRequest
                | ResolverState::NwkAddrRequest => break,
            }
        }
    }

    fn begin_exchange<T>(&mut self, transport: &mut T)
    where
        T: ZdpTransport + ?Sized,
    {
        let Some(head) = self.queue.head() else {
            self.state = ResolverState::Idle;
            return;
        };
        let (known, requested_kind, sequence) = (head.known, head.requested_kind, head.sequence);
        let tsn = self.get_next_tsn();

        let sent = match (known, requested_kind) {
            (Address::Short(short), AddressKind::Extended) => {
                let request = IeeeAddrRequest {
                    tsn,
                    nwk_addr_of_interest: short,
                    request_type: RequestType::SingleDevice,
                    start_index: 0,
                };
                info!(
                    "[ZDO-ADDR] IEEE_addr_req TSN {} for {} (request #{})",
                    tsn, short, sequence
                );
                self.state = ResolverState::IeeeAddrRequest;
                self.outstanding = Some(Exchange { tsn, queried: known });
                transport.send_ieee_addr_request(&request)
            }
            (Address::Extended(extended), AddressKind::Short) => {
                let request = NwkAddrRequest {
                    tsn,
                    destination: self.config.nwk_addr_req_destination,
                    ieee_addr_of_interest: extended,
                    request_type: RequestType::SingleDevice,
                    start_index: 0,
                };
                info!(
                    "[ZDO-ADDR] NWK_addr_req TSN {} for {} via {} (request #{})",
                    tsn, extended, request.destination, sequence
                );
                self.state = ResolverState::NwkAddrRequest;
                self.outstanding = Some(Exchange { tsn, queried: known });
                transport.send_nwk_addr_request(&request)
            }
            // `resolve` refuses same-kind requests, so this cannot be queued.
            (_, kind) => Err(ResolverError::AlreadyResolved(kind)),
        };

        if let Err(e) = sent {
            warn!("[ZDO-ADDR] Failed to send request TSN {} for {}: {}", tsn, known, e);
            self.outstanding = None;
            self.enter_confirm(Resolution::Failed {
                queried: known,
                failure: ResolveFailure::Transport,
            });
        }
    }

    fn enter_confirm(&mut self, resolution: Resolution) {
        self.pending_result = Some(resolution);
        self.state = ResolverState::Confirm;
    }

    fn confirm(&mut self) {
        let Some(resolution) = self.pending_result.take() else {
            self.state = if self.queue.is_empty() {
                ResolverState::Idle
            } else {
                ResolverState::Begin
            };
            return;
        };

        let answered = self.queue.take_matching(|request| resolution.answers(&request.known));
        if let Resolution::Resolved(pair) = resolution {
            self.cache.insert(pair);
        }
        self.state = if self.queue.is_empty() {
            ResolverState::Idle
        } else {
            ResolverState::Begin
        };

        match resolution {
            Resolution::Resolved(pair) => info!(
                "[ZDO-ADDR] Resolved {}, answering {} request(s), {} still pending",
                pair,
                answered.len(),
                self.queue.len()
            ),
            Resolution::Failed { queried, failure } => info!(
                "[ZDO-ADDR] Resolution of {} failed ({}), answering {} request(s), {} still pending",
                queried,
                failure,
                answered.len(),
                self.queue.len()
            ),
        }

        for request in answered {
            let confirm = resolution.confirm_for(request.known);
            request.deliver(confirm);
        }
    }
}
