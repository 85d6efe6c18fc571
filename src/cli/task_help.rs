pub const HEAT_HELPER: &'static str = "
                                Heat equation task file \n
The task file is a JSON object, every key is optional and falls back to its default. All values are in SI units
except temperatures, which are in degrees Celsius.

    alpha: 1e-4        thermal diffusivity, m^2/s
    nt: 500            number of time steps to compute
    Tb: 100.0          bath temperature on the Dirichlet edges
    T0: 20.0           initial plate temperature
    Lx: 0.01, Ly: 0.01 plate size, m
    nx: 41, ny: 41     grid points per axis (at least 3)
    neumann: \"ne\"      edges with zero-gradient (Neumann) condition, any combination of n, s, e, w
    no_neumann: false  true removes all Neumann conditions

Edges not listed in `neumann` are Dirichlet edges clamped to Tb. The time step is chosen as
dt = 0.25 * min(dx, dy)^2 / alpha, which keeps the explicit scheme stable.
";

pub const POISSON_HELPER: &'static str = "
                                Laplace-Poisson task file \n
The task file is a JSON object, every key is optional and falls back to its default.

    target: 1e-8             target precision of the Jacobi method (relative L2 norm)
    V: 100.0                 grid voltage
    N: 50                    the lattice has N+1 points per axis
    Q: 100.0                 charge value
    profile: \"Flat\"          starting potential: \"Flat\" (everything at V),
                             \"Capacitor\" (west wall +V, east wall -V),
                             \"Sinusoidal\" (east wall 0.5*V*sin(1.5*pi*i/N))
    max_iterations: 1000000  iteration cap, null for the library default

The border of the starting potential is kept fixed. Without painted charges a single charge Q is placed
in the middle of the lattice.
";
