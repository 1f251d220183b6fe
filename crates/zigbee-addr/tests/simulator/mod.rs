// crates/zigbee-addr/tests/simulator/mod.rs
pub mod transport;

pub use transport::SimulatedTransport;

use zigbee_addr::{
    AddrResponse, AddressKind, AddressPair, AddressResolver, ExtendedAddress, IeeeAddrRequest,
    NwkAddrRequest, ResolveConfirm, ResolverConfig, ResolverError, ShortAddress, Address,
};

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

/// A request as it was observed on the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirRequest {
    Ieee(IeeeAddrRequest),
    Nwk(NwkAddrRequest),
}

impl AirRequest {
    pub fn tsn(&self) -> u8 {
        match self {
            AirRequest::Ieee(r) => r.tsn,
            AirRequest::Nwk(r) => r.tsn,
        }
    }

    /// The address the request asks about.
    pub fn target(&self) -> Address {
        match self {
            AirRequest::Ieee(r) => Address::Short(r.nwk_addr_of_interest),
            AirRequest::Nwk(r) => Address::Extended(r.ieee_addr_of_interest),
        }
    }
}

/// A completion waiting to be handed back to the resolver.
#[derive(Debug, Clone, Copy)]
struct PendingCompletion {
    deliver_at_us: u64,
    response: AddrResponse,
}

/// A virtual mesh of devices that answers ZDP address requests.
///
/// Devices that are known but marked unreachable never answer. The
/// simulated transport then reports a timeout after `timeout_us`.
pub struct VirtualMesh {
    current_time_us: u64,
    devices: Vec<AddressPair>,
    unreachable: HashSet<ExtendedAddress>,
    pub latency_us: u64,
    pub timeout_us: u64,
    completions: VecDeque<PendingCompletion>,
    /// Every request sent, in order (for assertions).
    pub air_history: Vec<AirRequest>,
    /// Highest number of completions pending at once.
    pub max_in_flight: usize,
}

impl VirtualMesh {
    pub fn new() -> Self {
        Self {
            current_time_us: 0,
            devices: Vec::new(),
            unreachable: HashSet::new(),
            latency_us: 20_000,
            timeout_us: 1_500_000,
            completions: VecDeque::new(),
            air_history: Vec::new(),
            max_in_flight: 0,
        }
    }

    pub fn add_device(&mut self, short: u16, extended: u64) -> AddressPair {
        let pair = AddressPair::new(ShortAddress(short), ExtendedAddress(extended));
        self.devices.push(pair);
        pair
    }

    pub fn set_unreachable(&mut self, extended: u64) {
        self.unreachable.insert(ExtendedAddress(extended));
    }

    pub fn current_time(&self) -> u64 {
        self.current_time_us
    }

    pub fn in_flight(&self) -> usize {
        self.completions.len()
    }

    fn answering(&self, addr: &Address) -> Option<AddressPair> {
        self.devices
            .iter()
            .find(|pair| pair.contains(addr))
            .filter(|pair| !self.unreachable.contains(&pair.extended))
            .copied()
    }

    fn schedule(&mut self, tsn: u8, target: Address) {
        let completion = match self.answering(&target) {
            Some(pair) => PendingCompletion {
                deliver_at_us: self.current_time_us + self.latency_us,
                response: AddrResponse::resolved(tsn, pair.short, pair.extended),
            },
            None => PendingCompletion {
                deliver_at_us: self.current_time_us + self.timeout_us,
                response: AddrResponse::timed_out(tsn),
            },
        };
        self.completions.push_back(completion);
        self.max_in_flight = self.max_in_flight.max(self.completions.len());
    }

    pub fn submit_ieee_addr_req(&mut self, request: IeeeAddrRequest) {
        self.air_history.push(AirRequest::Ieee(request));
        self.schedule(request.tsn, Address::Short(request.nwk_addr_of_interest));
    }

    pub fn submit_nwk_addr_req(&mut self, request: NwkAddrRequest) {
        self.air_history.push(AirRequest::Nwk(request));
        self.schedule(request.tsn, Address::Extended(request.ieee_addr_of_interest));
    }

    /// Advances time and returns the completions that fell due.
    pub fn tick(&mut self, duration_us: u64) -> Vec<AddrResponse> {
        self.current_time_us += duration_us;
        let now = self.current_time_us;
        let mut due = Vec::new();
        self.completions.retain(|c| {
            if c.deliver_at_us <= now {
                due.push(c.response);
                false
            } else {
                true
            }
        });
        due
    }
}

/// Wraps an `AddressResolver`, its `SimulatedTransport` and the callbacks'
/// results for a test.
pub struct ResolverHarness {
    pub resolver: AddressResolver,
    pub transport: SimulatedTransport,
    pub mesh: Rc<RefCell<VirtualMesh>>,
    pub confirms: Rc<RefCell<Vec<(&'static str, ResolveConfirm)>>>,
}

impl ResolverHarness {
    pub fn new(mesh: VirtualMesh, config: ResolverConfig) -> Self {
        let mesh = Rc::new(RefCell::new(mesh));
        Self {
            resolver: AddressResolver::new(config).expect("valid resolver config"),
            transport: SimulatedTransport::new(Rc::clone(&mesh)),
            mesh,
            confirms: Rc::default(),
        }
    }

    /// Submits a resolution whose result is recorded under `name`.
    pub fn resolve(
        &mut self,
        name: &'static str,
        known: Address,
        wanted: AddressKind,
    ) -> Result<(), ResolverError> {
        let confirms = Rc::clone(&self.confirms);
        self.resolver.resolve(
            known,
            wanted,
            move |confirm| confirms.borrow_mut().push((name, confirm)),
            &mut self.transport,
        )
    }

    /// Advances the mesh by `duration_us` and feeds due completions to the resolver.
    pub fn step(&mut self, duration_us: u64) {
        let due = self.mesh.borrow_mut().tick(duration_us);
        for response in due {
            self.resolver.on_response(response, &mut self.transport);
        }
    }

    /// Steps in 1 ms increments until the resolver is idle or `max_us` elapses.
    pub fn run_until_idle(&mut self, max_us: u64) {
        let start = self.mesh.borrow().current_time();
        while !self.resolver.is_idle() && self.mesh.borrow().current_time() - start < max_us {
            self.step(1_000);
            assert!(
                self.mesh.borrow().in_flight() <= 1,
                "more than one exchange in flight at t={}us",
                self.mesh.borrow().current_time()
            );
        }
    }

    pub fn confirm(&self, name: &str) -> Vec<ResolveConfirm> {
        self.confirms
            .borrow()
            .iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .collect()
    }

    pub fn air_history(&self) -> Vec<AirRequest> {
        self.mesh.borrow().air_history.clone()
    }
}
